//! Order records sent to the order store.

use crate::cart::LineItem;
use crate::ids::{OrderId, ProductId};
use crate::money::{Currency, Money};
use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Prefix of every generated order number.
pub const ORDER_NUMBER_PREFIX: &str = "ORD";
const ORDER_NUMBER_SUFFIX_LEN: usize = 9;

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order recorded, not yet finished.
    #[default]
    Pending,
    /// Order placed through checkout.
    Completed,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// Payment status recorded with the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }
}

/// Structured shipping address stored on the order header.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub address: String,
    pub city: String,
    pub country: String,
    pub postal_code: String,
}

impl ShippingAddress {
    /// Format as single line.
    pub fn one_line(&self) -> String {
        [&self.address, &self.city, &self.postal_code, &self.country]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Order header as submitted by checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewOrder {
    /// Human-facing order number.
    pub order_number: String,
    pub customer_email: String,
    pub customer_name: String,
    /// Cart total in the base currency.
    pub total_amount: Money,
    /// Display currency the shopper had selected.
    pub currency: Currency,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub shipping_address: ShippingAddress,
}

/// One order row per cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i64,
    /// Unit price in the base currency.
    pub unit_price: Money,
    pub size: Option<String>,
}

impl From<&LineItem> for NewOrderItem {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.product.id.clone(),
            product_name: item.product.name.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price(),
            size: item.size.clone(),
        }
    }
}

/// An order header as persisted by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredOrder {
    /// Store-assigned identifier.
    pub id: OrderId,
    #[serde(flatten)]
    pub order: NewOrder,
    pub created_at: DateTime<Utc>,
}

impl StoredOrder {
    /// Wrap a header with a fresh store id.
    pub fn assign(order: NewOrder) -> Self {
        Self {
            id: OrderId::generate(),
            order,
            created_at: Utc::now(),
        }
    }
}

/// Generate a human-facing order number.
///
/// `ORD-<unix millis>-<9 uppercase alphanumerics>`. Unique with high
/// probability across sessions without any shared sequence; not monotonic.
pub fn generate_order_number() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ORDER_NUMBER_SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();
    format!("{}-{}-{}", ORDER_NUMBER_PREFIX, millis, suffix)
}

/// Check that a string has the shape produced by [`generate_order_number`].
pub fn is_order_number(value: &str) -> bool {
    let mut parts = value.split('-');
    let (Some(prefix), Some(millis), Some(suffix), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    prefix == ORDER_NUMBER_PREFIX
        && !millis.is_empty()
        && millis.chars().all(|c| c.is_ascii_digit())
        && suffix.len() == ORDER_NUMBER_SUFFIX_LEN
        && suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
}
