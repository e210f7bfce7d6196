//! Storefront domain types and logic for Shopfront.
//!
//! This crate holds everything a storefront session needs between the
//! product grid and the order store:
//!
//! - **Money**: display currencies, static conversion, price formatting
//! - **Catalog**: products, size charts, grouping by category
//! - **Cart**: lines keyed by product and size, derived totals
//! - **Checkout**: shipping and payment forms, the step machine, order submission
//! - **Store**: the order-store boundary with in-memory and JSON-lines backends
//! - **Billing**: provider price book and subscription plan labels
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use shopfront_commerce::prelude::*;
//!
//! let mut session = Session::new(Arc::new(Catalog::builtin()));
//! session.add_to_cart(&ProductId::new("1"), Some("M")).unwrap();
//! session.add_to_cart(&ProductId::new("1"), Some("M")).unwrap();
//! session.set_currency(Currency::EUR);
//!
//! let pricing = session.pricing();
//! assert_eq!(pricing.item_count, 2);
//! assert_eq!(pricing.total_label(), "€101.20");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod billing;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod session;
pub mod store;

pub use error::CommerceError;
pub use ids::*;
pub use money::{convert_price, format_price, Currency, Money};
pub use session::Session;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{convert_price, format_price, Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, CategoryGroup, Product, SizeChart};

    // Cart
    pub use crate::cart::{Cart, CartPricing, LineItem, LineItemPricing, LineKey};

    // Checkout
    pub use crate::checkout::{
        CheckoutFlow, CheckoutStep, NewOrder, NewOrderItem, OrderConfirmation, OrderStatus,
        PaymentField, PaymentInfo, PaymentStatus, ShippingAddress, ShippingField, ShippingInfo,
        StoredOrder,
    };

    // Store
    pub use crate::store::{InMemoryOrderStore, JsonlOrderStore, OrderStore, StoreError};

    // Billing
    pub use crate::billing::{plan_label, status_label, PriceBook, PriceListing};

    pub use crate::session::Session;
}
