//! JSON-lines order store.
//!
//! File layout: one object per line, tagged by `kind`.
//!
//! ```text
//! {"kind":"order","id":"...","order_number":"ORD-...",...}
//! {"kind":"items","order_id":"...","items":[...]}
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{OrderStore, StoreResult};
use crate::checkout::{NewOrder, NewOrderItem, StoredOrder};
use crate::ids::OrderId;

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Record {
    Order(StoredOrder),
    Items {
        order_id: OrderId,
        items: Vec<NewOrderItem>,
    },
}

/// A stored order read back together with its items.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub order: StoredOrder,
    pub items: Vec<NewOrderItem>,
}

impl OrderRecord {
    /// Total number of units across the items.
    pub fn unit_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// Append-only order store backed by a local file.
pub struct JsonlOrderStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlOrderStore {
    /// Create a store writing to `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored order, oldest first.
    ///
    /// A missing file is an empty store. Unreadable lines are skipped.
    pub async fn list_orders(&self) -> StoreResult<Vec<OrderRecord>> {
        if !fs::try_exists(&self.path).await? {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).await?;
        let mut records: Vec<OrderRecord> = Vec::new();

        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Record>(line) {
                Ok(Record::Order(order)) => records.push(OrderRecord {
                    order,
                    items: Vec::new(),
                }),
                Ok(Record::Items { order_id, items }) => {
                    match records.iter_mut().find(|r| r.order.id == order_id) {
                        Some(record) => record.items.extend(items),
                        None => warn!(line = index + 1, %order_id, "items for unknown order"),
                    }
                }
                Err(e) => warn!(line = index + 1, error = %e, "skipping unreadable order line"),
            }
        }

        Ok(records)
    }

    async fn append(&self, record: &Record) -> StoreResult<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl OrderStore for JsonlOrderStore {
    async fn insert_order(&self, order: &NewOrder) -> StoreResult<StoredOrder> {
        let stored = StoredOrder::assign(order.clone());
        self.append(&Record::Order(stored.clone())).await?;
        debug!(path = %self.path.display(), order_id = %stored.id, "appended order header");
        Ok(stored)
    }

    async fn insert_order_items(&self, order_id: &OrderId, items: &[NewOrderItem]) -> StoreResult<()> {
        self.append(&Record::Items {
            order_id: order_id.clone(),
            items: items.to_vec(),
        })
        .await?;
        debug!(path = %self.path.display(), %order_id, count = items.len(), "appended order items");
        Ok(())
    }
}
