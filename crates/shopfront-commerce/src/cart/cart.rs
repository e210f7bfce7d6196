//! Cart and line item types.

use crate::cart::key::normalize_size;
use crate::cart::{CartPricing, LineItemPricing, LineKey};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A shopping cart.
///
/// Holds nothing but its lines. Counts and totals are always derived from
/// the lines on request. No two lines share a [`LineKey`] and every line has
/// a quantity of at least 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line for `(product, size)` or appends a new
    /// line with quantity 1. Returns the line's new quantity.
    pub fn add(&mut self, product: &Product, size: Option<&str>) -> i64 {
        self.add_units(product, size, 1)
    }

    /// Add `units` of a product in one step, as if [`Self::add`] were called
    /// that many times. Fewer than one unit counts as one.
    pub fn add_units(&mut self, product: &Product, size: Option<&str>, units: i64) -> i64 {
        let units = units.max(1);
        let key = LineKey::new(product.id.clone(), size);

        if let Some(existing) = self.items.iter_mut().find(|i| i.key() == key) {
            existing.quantity = existing.quantity.saturating_add(units);
            debug!(line = %key, quantity = existing.quantity, "incremented cart line");
            return existing.quantity;
        }

        self.items.push(LineItem::new(product.clone(), key.size.clone(), units));
        debug!(line = %key, quantity = units, "added cart line");
        units
    }

    /// Set the quantity of a line.
    ///
    /// A quantity of zero or less removes the line. Returns whether a line
    /// matched.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64, size: Option<&str>) -> bool {
        if quantity <= 0 {
            return self.remove(product_id, size);
        }

        let key = LineKey::new(product_id.clone(), size);
        match self.items.iter_mut().find(|i| i.key() == key) {
            Some(item) => {
                item.quantity = quantity;
                debug!(line = %key, quantity, "set cart line quantity");
                true
            }
            None => false,
        }
    }

    /// Remove a line. Removing a line that is not in the cart is a no-op.
    pub fn remove(&mut self, product_id: &ProductId, size: Option<&str>) -> bool {
        let key = LineKey::new(product_id.clone(), size);
        let len_before = self.items.len();
        self.items.retain(|i| i.key() != key);
        let removed = self.items.len() < len_before;
        if removed {
            debug!(line = %key, "removed cart line");
        }
        removed
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get a line by key.
    pub fn get(&self, key: &LineKey) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.key() == key)
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of `price * quantity` over all lines, in the base currency.
    ///
    /// Saturates instead of overflowing.
    pub fn total(&self) -> Money {
        let cents = self
            .items
            .iter()
            .fold(0_i64, |acc, item| acc.saturating_add(item.line_total().amount_cents));
        Money::new(cents, Currency::BASE)
    }

    /// Per-line and total pricing, converted for display.
    pub fn pricing(&self, display: Currency) -> CartPricing {
        let lines = self
            .items
            .iter()
            .map(|item| LineItemPricing {
                key: item.key(),
                name: item.product.name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price(),
                line_total: item.line_total(),
                display_unit_price: item.unit_price().convert_to(display),
                display_line_total: item.line_total().convert_to(display),
            })
            .collect();

        let subtotal = self.total();
        CartPricing {
            item_count: self.item_count(),
            subtotal,
            display_currency: display,
            display_total: subtotal.convert_to(display),
            lines,
        }
    }
}

/// A line in the cart: a product snapshot plus size and quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product as it was when first added.
    pub product: Product,
    /// Selected size, if the product takes one.
    pub size: Option<String>,
    /// Quantity, always at least 1.
    pub quantity: i64,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(product: Product, size: Option<String>, quantity: i64) -> Self {
        Self {
            product,
            size: normalize_size(size.as_deref()),
            quantity,
        }
    }

    /// Identity of this line.
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product.id.clone(),
            size: self.size.clone(),
        }
    }

    /// Unit price in the base currency.
    pub fn unit_price(&self) -> Money {
        self.product.price.convert_to(Currency::BASE)
    }

    /// Base-currency unit price times quantity, saturating.
    pub fn line_total(&self) -> Money {
        let unit = self.unit_price();
        Money::new(unit.amount_cents.saturating_mul(self.quantity), unit.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tee() -> Product {
        Product::new("1", "NHH SIGNATURE TEE", Money::base(55), "T-Shirts")
    }

    fn cap() -> Product {
        Product::new("13", "NHH SIGNATURE CAP - BLACK", Money::base(45), "Caps")
    }

    #[test]
    fn test_repeated_add_merges() {
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart.add(&tee(), Some("M"));
        }

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_sizes_are_separate_lines() {
        let mut cart = Cart::new();
        cart.add(&tee(), Some("M"));
        cart.add(&tee(), Some("L"));
        cart.add(&tee(), None);

        assert_eq!(cart.line_count(), 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_keeps_snapshot() {
        let mut cart = Cart::new();
        cart.add(&tee(), Some("S"));
        let mut renamed = tee();
        renamed.name = "RENAMED".to_string();
        cart.add(&renamed, Some("S"));

        let line = cart.get(&LineKey::new(ProductId::new("1"), Some("S"))).unwrap();
        assert_eq!(line.product.name, "NHH SIGNATURE TEE");
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add(&cap(), None);

        assert!(cart.set_quantity(&ProductId::new("13"), 7, None));
        assert_eq!(cart.item_count(), 7);
        assert!(!cart.set_quantity(&ProductId::new("13"), 3, Some("M")));
        assert_eq!(cart.item_count(), 7);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(&cap(), None);
        cart.add(&tee(), Some("M"));

        assert!(cart.set_quantity(&ProductId::new("1"), 0, Some("M")));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 1);

        assert!(cart.set_quantity(&ProductId::new("13"), -4, None));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(&cap(), None);

        assert!(!cart.remove(&ProductId::new("99"), None));
        assert!(!cart.remove(&ProductId::new("13"), Some("M")));
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_total_independent_of_order() {
        let mut a = Cart::new();
        a.add(&tee(), Some("M"));
        a.add(&tee(), Some("M"));
        a.add(&cap(), None);

        let mut b = Cart::new();
        b.add(&cap(), None);
        b.add(&tee(), Some("M"));
        b.add(&tee(), Some("M"));

        assert_eq!(a.total(), Money::base(155));
        assert_eq!(a.total(), b.total());
    }

    #[test]
    fn test_pricing_converts_for_display() {
        let mut cart = Cart::new();
        cart.add(&tee(), None);
        cart.add(&tee(), None);

        let pricing = cart.pricing(Currency::EUR);
        assert_eq!(pricing.item_count, 2);
        assert_eq!(pricing.subtotal, Money::base(110));
        assert_eq!(pricing.display_total, Money::new(10120, Currency::EUR));
        assert_eq!(pricing.lines[0].display_unit_price, Money::new(5060, Currency::EUR));
    }

    #[test]
    fn test_add_units_merges_like_repeated_add() {
        let mut cart = Cart::new();
        cart.add(&tee(), Some("M"));
        assert_eq!(cart.add_units(&tee(), Some("M"), 4_000_000_000), 4_000_000_001);
        assert_eq!(cart.add_units(&cap(), None, 0), 1);
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.item_count(), 4_000_000_002);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&cap(), None);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero(Currency::USD));
    }

    #[test]
    fn test_total_counts_foreign_prices_in_base() {
        let yen_cap = Product::new("20", "Cap", Money::new(1000, Currency::JPY), "Caps");
        let mut cart = Cart::new();
        cart.add(&tee(), Some("M"));
        cart.add(&yen_cap, None);

        // 1000 / 149.5 = 6.689...
        assert_eq!(cart.items()[1].unit_price(), Money::new(669, Currency::USD));
        assert_eq!(cart.total(), Money::new(6169, Currency::USD));
    }
}
