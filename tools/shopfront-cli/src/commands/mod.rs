//! CLI command implementations.

pub mod catalog;
pub mod init;
pub mod order;
pub mod orders;
pub mod plan;
pub mod price;

use clap::Args;
use shopfront_commerce::Currency;

use crate::context::Context;

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Display currency (default: shop currency).
    #[arg(short = 'C', long)]
    pub currency: Option<String>,

    /// Show only this category.
    #[arg(long)]
    pub category: Option<String>,
}

/// Arguments for the price command.
#[derive(Args)]
pub struct PriceArgs {
    /// Amount in the base currency.
    pub amount: f64,

    /// Target currency (default: shop currency).
    #[arg(short = 'C', long)]
    pub currency: Option<String>,
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// Order plan file (TOML).
    pub plan: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run (place the order in memory only).
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    /// Show only the last N orders.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the plan command.
#[derive(Args)]
pub struct PlanArgs {
    /// Subscription price id; lists the price book when omitted.
    pub price_id: Option<String>,

    /// Subscription status as reported by the provider.
    #[arg(long)]
    pub status: Option<String>,
}

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Shop name (default: current directory name).
    #[arg(long)]
    pub name: Option<String>,

    /// Force overwrite existing config.
    #[arg(short, long)]
    pub force: bool,
}

/// The requested display currency, else the shop default.
///
/// Unknown codes fall back to the base currency with a warning.
pub(crate) fn display_currency(code: Option<&str>, ctx: &Context) -> Currency {
    match code {
        None => ctx.config.default_currency(),
        Some(code) => Currency::from_code(code).unwrap_or_else(|| {
            ctx.output.warn(&format!(
                "Unknown currency '{}', showing {}",
                code,
                Currency::BASE.code()
            ));
            Currency::BASE
        }),
    }
}
