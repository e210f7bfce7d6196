//! Commerce error types.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur in storefront operations.
///
/// Every variant is session-local: the shopper can retry or dismiss the
/// checkout and carry on.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// One or more required form fields are blank.
    #[error("Missing required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    /// A product that takes a size was added without one.
    #[error("Product {0} requires a size")]
    SizeRequired(String),

    /// The requested size is not on the product's size chart.
    #[error("Size {size} is not available for product {product_id}")]
    InvalidSize { product_id: String, size: String },

    /// A catalog product is priced outside the base currency.
    #[error("Product {product_id} is priced in {currency}; catalog prices must be in USD")]
    NonBasePrice { product_id: String, currency: String },

    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    UnknownProduct(String),

    /// Checkout was asked to move somewhere its current step does not allow.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Another order submission for this checkout has not resolved yet.
    #[error("An order submission is already in progress")]
    SubmissionInFlight,

    /// A submission result arrived after its checkout was closed.
    #[error("Order submission was abandoned")]
    StaleSubmission,

    /// Nothing to order.
    #[error("Cart is empty")]
    EmptyCart,

    /// The order store rejected the order header.
    #[error("Order submission failed: {0}")]
    Submission(String),

    /// The order header was stored but its items were not.
    #[error("Order {order_id} was created but its items could not be saved: {reason}")]
    PartialPersistence { order_id: String, reason: String },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Catalog or store file error.
    #[error("IO error: {0}")]
    Io(String),
}

impl CommerceError {
    /// Build a validation error from a list of missing field names.
    pub fn missing(fields: Vec<&'static str>) -> Self {
        CommerceError::Validation { missing: fields }
    }
}

impl From<StoreError> for CommerceError {
    fn from(e: StoreError) -> Self {
        CommerceError::Submission(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CommerceError {
    fn from(e: std::io::Error) -> Self {
        CommerceError::Io(e.to_string())
    }
}
