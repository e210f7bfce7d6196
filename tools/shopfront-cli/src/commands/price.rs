//! Convert and format a base-currency amount.

use anyhow::{bail, Result};
use shopfront_commerce::{Currency, Money};

use super::{display_currency, PriceArgs};
use crate::context::Context;

/// Run the price command.
pub async fn run(args: PriceArgs, ctx: &Context) -> Result<()> {
    if !args.amount.is_finite() {
        bail!("Amount must be a finite number");
    }

    let base = Money::from_decimal(args.amount, Currency::BASE);
    let currency = display_currency(args.currency.as_deref(), ctx);
    let converted = base.convert_to(currency);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "amount": base,
            "currency": currency.code(),
            "converted": converted,
            "display": converted.display(),
        }));
        return Ok(());
    }

    println!("{}", converted.display());
    ctx.output.debug(&format!(
        "{} × {} ({})",
        base.display(),
        currency.exchange_rate(),
        currency.code()
    ));
    Ok(())
}
