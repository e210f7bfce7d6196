//! List stored orders.

use anyhow::{Context as _, Result};
use serde::Serialize;
use shopfront_commerce::store::OrderRecord;

use super::OrdersArgs;
use crate::context::Context;
use crate::output::{format_timestamp, status_badge};

const COLUMNS: [usize; 5] = [30, 20, 28, 7, 12];

#[derive(Debug, Serialize)]
struct OrderSummary {
    order_number: String,
    created_at: String,
    customer_email: String,
    units: i64,
    total: String,
    currency: String,
    status: String,
}

impl From<&OrderRecord> for OrderSummary {
    fn from(record: &OrderRecord) -> Self {
        let order = &record.order.order;
        Self {
            order_number: order.order_number.clone(),
            created_at: format_timestamp(&record.order.created_at),
            customer_email: order.customer_email.clone(),
            units: record.unit_count(),
            // Recorded totals are in the base currency.
            total: order.total_amount.display(),
            currency: order.currency.code().to_string(),
            status: order.status.as_str().to_string(),
        }
    }
}

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    let store = ctx.order_store();
    let records = store
        .list_orders()
        .await
        .with_context(|| format!("Failed to read orders from {}", store.path().display()))?;

    let summaries = newest_first(&records, args.limit);

    if ctx.output.is_json() {
        ctx.output.json(&summaries);
        return Ok(());
    }

    ctx.output.header(&format!("Orders for {}", ctx.config.shop.name));

    if summaries.is_empty() {
        ctx.output.info("No orders found.");
        ctx.output.info("Run `shopfront order <PLAN>` to place one.");
        return Ok(());
    }

    ctx.output.table_row(
        &["ORDER", "PLACED", "EMAIL", "UNITS", "TOTAL", "STATUS"],
        &COLUMNS,
    );
    ctx.output.info(&"-".repeat(110));

    for s in &summaries {
        let units = s.units.to_string();
        let status = status_badge(&s.status);
        ctx.output.table_row(
            &[&s.order_number, &s.created_at, &s.customer_email, &units, &s.total, &status],
            &COLUMNS,
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!(
        "Showing {} of {} order(s)",
        summaries.len(),
        records.len()
    ));

    Ok(())
}

fn newest_first(records: &[OrderRecord], limit: Option<usize>) -> Vec<OrderSummary> {
    let mut sorted: Vec<&OrderRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.order.created_at.cmp(&a.order.created_at));
    sorted
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(OrderSummary::from)
        .collect()
}
