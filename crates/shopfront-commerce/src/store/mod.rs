//! Order store boundary.
//!
//! Checkout persists an order as a header row followed by its item rows.
//! Backends implement [`OrderStore`]; two ship with the crate:
//!
//! - [`InMemoryOrderStore`] for tests and dry runs, with failure injection
//! - [`JsonlOrderStore`] appending JSON lines to a local file

mod jsonl;
mod memory;

pub use jsonl::{JsonlOrderStore, OrderRecord};
pub use memory::InMemoryOrderStore;

use async_trait::async_trait;

use crate::checkout::{NewOrder, NewOrderItem, StoredOrder};
use crate::ids::OrderId;

/// Result type for order store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Order store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store refused the write.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The store could not be reached.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// Backing file error.
    #[error("io error: {0}")]
    Io(String),

    /// A row could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

/// Persistence for placed orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Store an order header and return it with its assigned id.
    async fn insert_order(&self, order: &NewOrder) -> StoreResult<StoredOrder>;

    /// Store the item rows of an already stored order.
    async fn insert_order_items(&self, order_id: &OrderId, items: &[NewOrderItem]) -> StoreResult<()>;
}
