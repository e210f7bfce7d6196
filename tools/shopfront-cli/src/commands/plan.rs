//! Price book listing and subscription plan display.

use anyhow::Result;
use shopfront_commerce::billing::{plan_label, status_label, PriceBook, SubscriptionSnapshot};
use shopfront_commerce::PriceId;

use super::PlanArgs;
use crate::context::Context;
use crate::output::status_badge;

/// Run the plan command.
pub async fn run(args: PlanArgs, ctx: &Context) -> Result<()> {
    let book = PriceBook::builtin();

    match args.price_id {
        None if args.status.is_none() => list_price_book(&book, ctx),
        price_id => {
            let snapshot = SubscriptionSnapshot {
                price_id: price_id.map(PriceId::new),
                status: args.status,
            };
            show_plan(&book, &snapshot, ctx);
        }
    }

    Ok(())
}

fn list_price_book(book: &PriceBook, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(book);
        return;
    }

    ctx.output.header("Price book");
    for listing in book.listings() {
        ctx.output.table_row(
            &[
                listing.price_id.as_str(),
                &listing.name,
                listing.mode.as_str(),
                &listing.price.display(),
            ],
            &[32, 34, 14],
        );
    }
}

fn show_plan(book: &PriceBook, snapshot: &SubscriptionSnapshot, ctx: &Context) {
    let plan = plan_label(book, Some(snapshot));
    let status = snapshot.status.as_deref().map(status_label);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "plan": plan,
            "status": status,
        }));
        return;
    }

    ctx.output.header("Subscription");
    ctx.output.kv("Plan", plan);
    if let Some(status) = status {
        ctx.output.kv("Status", &status_badge(&status));
    }
}
