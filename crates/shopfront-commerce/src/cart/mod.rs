//! Shopping cart module.
//!
//! Contains the cart, its line identity and the pricing breakdown.

mod cart;
mod key;
mod pricing;

pub use cart::{Cart, LineItem};
pub use key::LineKey;
pub use pricing::{CartPricing, LineItemPricing};
