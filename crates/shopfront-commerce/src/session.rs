//! Storefront session.
//!
//! One shopper's cart, checkout and selected display currency over a shared
//! catalog. Sessions are independent of each other.

use std::sync::Arc;

use tracing::{debug, info};

use crate::cart::{Cart, CartPricing};
use crate::catalog::{Catalog, Product};
use crate::checkout::{CheckoutFlow, CheckoutStep, OrderConfirmation};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;
use crate::store::OrderStore;

/// A shopper's session.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Arc<Catalog>,
    cart: Cart,
    checkout: CheckoutFlow,
    currency: Currency,
}

impl Session {
    /// Start a session with an empty cart in the base currency.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            checkout: CheckoutFlow::new(),
            currency: Currency::BASE,
        }
    }

    /// Set the initial display currency.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn checkout(&self) -> &CheckoutFlow {
        &self.checkout
    }

    /// Mutable access to the checkout draft, for form input.
    pub fn checkout_mut(&mut self) -> &mut CheckoutFlow {
        &mut self.checkout
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Change the display currency. Cart contents are unaffected.
    pub fn set_currency(&mut self, currency: Currency) {
        debug!(from = %self.currency.code(), to = %currency.code(), "display currency changed");
        self.currency = currency;
    }

    /// Add one unit of a catalog product.
    ///
    /// Products with a size chart need one of its sizes. A size given for a
    /// product without a chart is dropped.
    pub fn add_to_cart(&mut self, product_id: &ProductId, size: Option<&str>) -> Result<i64, CommerceError> {
        self.add_units_to_cart(product_id, size, 1)
    }

    /// Add several units at once, with the same size rules as
    /// [`Self::add_to_cart`]. Returns the line's new quantity.
    pub fn add_units_to_cart(
        &mut self,
        product_id: &ProductId,
        size: Option<&str>,
        units: i64,
    ) -> Result<i64, CommerceError> {
        let product = self
            .catalog
            .product(product_id)
            .ok_or_else(|| CommerceError::UnknownProduct(product_id.to_string()))?;
        let size = self.checked_size(product, size)?;
        Ok(self.cart.add_units(product, size, units))
    }

    /// Set a line's quantity; zero or less removes it.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64, size: Option<&str>) -> bool {
        self.cart.set_quantity(product_id, quantity, size)
    }

    /// Remove a line.
    pub fn remove_from_cart(&mut self, product_id: &ProductId, size: Option<&str>) -> bool {
        self.cart.remove(product_id, size)
    }

    /// Cart totals in the display currency.
    pub fn pricing(&self) -> CartPricing {
        self.cart.pricing(self.currency)
    }

    /// Open checkout for a non-empty cart.
    pub fn open_checkout(&mut self) -> Result<(), CommerceError> {
        if self.cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        self.checkout.open()
    }

    /// Submit the payment step and persist the order.
    ///
    /// The cart is cleared only when the order was stored in full.
    pub async fn place_order<S>(&mut self, store: &S) -> Result<OrderConfirmation, CommerceError>
    where
        S: OrderStore + ?Sized,
    {
        let confirmation = self
            .checkout
            .submit_payment(&self.cart, self.currency, store)
            .await?;
        self.cart.clear();
        info!(order_number = %confirmation.order_number, "cart cleared after order");
        Ok(confirmation)
    }

    /// Close checkout from any step. Returns the step it was in.
    pub fn close_checkout(&mut self) -> CheckoutStep {
        let previous = self.checkout.close();
        if previous == CheckoutStep::Success {
            self.cart.clear();
        }
        previous
    }

    fn checked_size<'s>(&self, product: &Product, size: Option<&'s str>) -> Result<Option<&'s str>, CommerceError> {
        let chart = match self.catalog.size_chart(product) {
            Some(chart) if chart.requires_size() => chart,
            _ => return Ok(None),
        };

        let size = size
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CommerceError::SizeRequired(product.id.to_string()))?;
        if !chart.offers(size) {
            return Err(CommerceError::InvalidSize {
                product_id: product.id.to_string(),
                size: size.to_string(),
            });
        }
        Ok(Some(size))
    }
}
