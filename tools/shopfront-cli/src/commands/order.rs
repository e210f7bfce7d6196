//! Place an order from an order plan.
//!
//! An order plan scripts one shopper session:
//!
//! ```toml
//! currency = "EUR"
//!
//! [[items]]
//! product = "1"
//! size = "M"
//! quantity = 2
//!
//! [shipping]
//! email = "ada@example.com"
//! first_name = "Ada"
//! last_name = "Lovelace"
//! address = "12 St James's Square"
//! city = "London"
//! country = "United Kingdom"
//! postal_code = "SW1Y 4JH"
//!
//! [payment]
//! card_number = "4111111111111111"
//! card_name = "Ada Lovelace"
//! expiry_date = "1229"
//! cvv = "123"
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use serde::Deserialize;
use shopfront_commerce::catalog::Catalog;
use shopfront_commerce::checkout::{PaymentField, ShippingField};
use shopfront_commerce::store::{InMemoryOrderStore, OrderStore};
use shopfront_commerce::{Currency, ProductId, Session};

use super::{display_currency, OrderArgs};
use crate::context::Context;

/// A scripted shopper session.
#[derive(Debug, Deserialize)]
pub struct OrderPlan {
    /// Display currency; the shop default when absent.
    #[serde(default)]
    pub currency: Option<String>,
    pub items: Vec<PlanItem>,
    /// Shipping form input, keyed by field name.
    #[serde(default)]
    pub shipping: BTreeMap<String, String>,
    /// Raw payment input, keyed by field name.
    #[serde(default)]
    pub payment: BTreeMap<String, String>,
}

/// One cart line of a plan.
#[derive(Debug, Deserialize)]
pub struct PlanItem {
    pub product: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl OrderPlan {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse order plan")
    }
}

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.plan);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read order plan: {}", path.display()))?;
    let plan = OrderPlan::parse(&content)?;

    let currency = display_currency(plan.currency.as_deref(), ctx);
    let mut session = prepare_session(Arc::new(ctx.catalog()?), &plan, currency)?;

    // Summary
    let pricing = session.pricing();
    if !ctx.output.is_json() {
        ctx.output.header(session.checkout().step().title());
        for line in &pricing.lines {
            ctx.output.table_row(
                &[
                    &line.key.to_string(),
                    &format!("× {}", line.quantity),
                    &line.display_line_total.display(),
                ],
                &[10, 6, 12],
            );
        }
        ctx.output.kv("Total", &pricing.total_label());
        ctx.output.kv("Ship to", &session.checkout().shipping().shipping_address().one_line());
        ctx.output.kv("Card", &session.checkout().payment().masked_card_number());
    }

    if !args.yes && !args.dry_run && !ctx.output.is_json() {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt("Place this order?")
            .default(true)
            .interact()?;

        if !confirmed {
            session.close_checkout();
            ctx.output.warn("Order cancelled");
            return Ok(());
        }
    }

    let store: Box<dyn OrderStore> = if args.dry_run {
        ctx.output.info("Dry run: the order is kept in memory only");
        Box::new(InMemoryOrderStore::new())
    } else {
        Box::new(ctx.order_store())
    };

    let spinner = ctx.output.spinner("Placing order...");
    let result = session.place_order(store.as_ref()).await;
    spinner.finish_and_clear();

    let confirmation = result.context("Order was not placed")?;

    if ctx.output.is_json() {
        ctx.output.json(&confirmation);
    } else {
        ctx.output.header(session.checkout().step().title());
        ctx.output.success(&format!("Order {} placed", confirmation.order_number));
        ctx.output.kv("Confirmation sent to", &confirmation.email);
        ctx.output.debug(&format!("Store id: {}", confirmation.order_id));
    }

    session.close_checkout();
    Ok(())
}

/// Fill a cart and the checkout forms from a plan, ending on the payment step.
pub fn prepare_session(catalog: Arc<Catalog>, plan: &OrderPlan, currency: Currency) -> Result<Session> {
    if plan.items.is_empty() {
        bail!("Order plan has no items");
    }

    let mut session = Session::new(catalog).with_currency(currency);

    for item in &plan.items {
        if item.quantity == 0 {
            bail!("Quantity for product {} must be at least 1", item.product);
        }
        let product_id = ProductId::new(item.product.as_str());
        session.add_units_to_cart(&product_id, item.size.as_deref(), i64::from(item.quantity))?;
    }

    session.open_checkout()?;

    let flow = session.checkout_mut();
    for (name, value) in &plan.shipping {
        let field = ShippingField::from_name(name)
            .with_context(|| format!("Unknown shipping field: {}", name))?;
        flow.set_shipping_field(field, value.as_str())?;
    }
    flow.submit_shipping()?;

    for (name, value) in &plan.payment {
        let field = PaymentField::from_name(name)
            .with_context(|| format!("Unknown payment field: {}", name))?;
        flow.set_payment_field(field, value)?;
    }

    Ok(session)
}
