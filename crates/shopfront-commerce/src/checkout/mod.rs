//! Checkout module.
//!
//! Contains the checkout flow, its shipping and payment forms, and the
//! order records it submits.

mod flow;
mod order;
mod payment;
mod shipping;
mod submit;

pub use flow::{CheckoutFlow, CheckoutStep, OrderConfirmation, OrderSubmission, SubmissionTicket};
pub use order::{
    generate_order_number, is_order_number, NewOrder, NewOrderItem, OrderStatus, PaymentStatus,
    ShippingAddress, StoredOrder, ORDER_NUMBER_PREFIX,
};
pub use payment::{
    format_card_number, format_cvv, format_expiry_date, PaymentField, PaymentInfo,
    CARD_NUMBER_MAX_LEN, CVV_MAX_LEN, EXPIRY_MAX_LEN,
};
pub use shipping::{ShippingField, ShippingInfo};
pub use submit::submit_order;
