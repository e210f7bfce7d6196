//! In-memory order store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{OrderStore, StoreError, StoreResult};
use crate::checkout::{NewOrder, NewOrderItem, StoredOrder};
use crate::ids::OrderId;

#[derive(Default)]
struct Rows {
    orders: Vec<StoredOrder>,
    items: HashMap<OrderId, Vec<NewOrderItem>>,
}

/// In-memory order store (for development/testing).
///
/// Either write can be made to fail, to exercise checkout's failure paths.
#[derive(Default)]
pub struct InMemoryOrderStore {
    rows: Mutex<Rows>,
    fail_header: bool,
    fail_items: bool,
}

impl InMemoryOrderStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every order header.
    pub fn fail_header(mut self, fail: bool) -> Self {
        self.fail_header = fail;
        self
    }

    /// Reject every batch of order items.
    pub fn fail_items(mut self, fail: bool) -> Self {
        self.fail_items = fail;
        self
    }

    /// Stored headers, oldest first.
    pub async fn orders(&self) -> Vec<StoredOrder> {
        self.rows.lock().await.orders.clone()
    }

    /// Stored items of one order.
    pub async fn items_for(&self, order_id: &OrderId) -> Vec<NewOrderItem> {
        self.rows
            .lock()
            .await
            .items
            .get(order_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Total number of stored item rows.
    pub async fn item_count(&self) -> usize {
        self.rows.lock().await.items.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert_order(&self, order: &NewOrder) -> StoreResult<StoredOrder> {
        if self.fail_header {
            return Err(StoreError::Unavailable("order header write disabled".to_string()));
        }
        let stored = StoredOrder::assign(order.clone());
        self.rows.lock().await.orders.push(stored.clone());
        Ok(stored)
    }

    async fn insert_order_items(&self, order_id: &OrderId, items: &[NewOrderItem]) -> StoreResult<()> {
        if self.fail_items {
            return Err(StoreError::Unavailable("order item write disabled".to_string()));
        }
        let mut rows = self.rows.lock().await;
        if !rows.orders.iter().any(|o| &o.id == order_id) {
            return Err(StoreError::Rejected(format!("unknown order {}", order_id)));
        }
        rows.items
            .entry(order_id.clone())
            .or_default()
            .extend_from_slice(items);
        Ok(())
    }
}
