//! Cart pricing breakdown for presentation.

use crate::cart::LineKey;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Pricing snapshot of a cart, computed on demand.
///
/// Base-currency figures are authoritative; the display figures are the
/// same amounts converted with the static rate table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of quantities.
    pub item_count: i64,
    /// Total in the base currency.
    pub subtotal: Money,
    /// Currency the display figures are in.
    pub display_currency: Currency,
    /// Total converted to the display currency.
    pub display_total: Money,
    /// Per-line breakdown.
    pub lines: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Formatted display total (e.g., "€101.20").
    pub fn total_label(&self) -> String {
        self.display_total.display()
    }
}

/// Pricing for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    pub key: LineKey,
    pub name: String,
    pub quantity: i64,
    /// Unit price in the base currency.
    pub unit_price: Money,
    /// Unit price times quantity in the base currency.
    pub line_total: Money,
    pub display_unit_price: Money,
    pub display_line_total: Money,
}
