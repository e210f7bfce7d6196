//! Checkout flow state machine.
//!
//! ```text
//! Closed --open--> Shipping --submit_shipping--> Payment --submission ok--> Success
//!                     ^                             |
//!                     +------------back-------------+
//! any step --close--> Closed (draft reset)
//! ```
//!
//! Order submission is split in two so a caller that cannot hold `&mut`
//! across the store call can still drive it: [`CheckoutFlow::begin_submission`]
//! hands out an [`OrderSubmission`] carrying a ticket, and
//! [`CheckoutFlow::finish_submission`] applies the store's answer. While a
//! ticket is outstanding a second submission is refused. Closing the flow
//! invalidates the ticket, so a late answer cannot touch a fresh draft.

use crate::cart::Cart;
use crate::checkout::{
    generate_order_number, submit_order, NewOrder, NewOrderItem, OrderStatus, PaymentField,
    PaymentInfo, PaymentStatus, ShippingField, ShippingInfo,
};
use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::money::Currency;
use crate::store::OrderStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    /// Checkout dialog not shown.
    #[default]
    Closed,
    /// Contact and shipping details.
    Shipping,
    /// Card details and order submission.
    Payment,
    /// Order placed.
    Success,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Closed => "closed",
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Success => "success",
        }
    }

    /// Dialog title for the step.
    pub fn title(&self) -> &'static str {
        match self {
            CheckoutStep::Closed => "",
            CheckoutStep::Shipping => "CHECKOUT",
            CheckoutStep::Payment => "PAYMENT",
            CheckoutStep::Success => "ORDER COMPLETE",
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proof of an in-flight submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket(u64);

/// Everything the order store needs for one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSubmission {
    pub ticket: SubmissionTicket,
    pub order: NewOrder,
    pub items: Vec<NewOrderItem>,
}

/// Shown on the success step until the flow is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub order_number: String,
    pub email: String,
}

/// Checkout state and its draft.
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    shipping: ShippingInfo,
    payment: PaymentInfo,
    in_flight: Option<SubmissionTicket>,
    next_ticket: u64,
    confirmation: Option<OrderConfirmation>,
    last_error: Option<String>,
}

impl CheckoutFlow {
    /// Create a closed checkout.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn is_open(&self) -> bool {
        self.step != CheckoutStep::Closed
    }

    /// Whether an order submission is awaiting the store.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn shipping(&self) -> &ShippingInfo {
        &self.shipping
    }

    pub fn payment(&self) -> &PaymentInfo {
        &self.payment
    }

    /// Confirmation of the placed order, on the success step.
    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    /// Message of the most recent failed submission.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Closed -> Shipping.
    pub fn open(&mut self) -> Result<(), CommerceError> {
        if self.step != CheckoutStep::Closed {
            return Err(self.invalid_transition(CheckoutStep::Shipping));
        }
        self.step = CheckoutStep::Shipping;
        info!(step = %self.step, "checkout opened");
        Ok(())
    }

    /// Record shipping input as typed.
    pub fn set_shipping_field(
        &mut self,
        field: ShippingField,
        value: impl Into<String>,
    ) -> Result<(), CommerceError> {
        self.require_editable()?;
        self.shipping.set(field, value);
        Ok(())
    }

    /// Replace the whole shipping form.
    pub fn set_shipping(&mut self, shipping: ShippingInfo) -> Result<(), CommerceError> {
        self.require_editable()?;
        self.shipping = shipping;
        Ok(())
    }

    /// Shipping -> Payment, once every shipping field is filled in.
    pub fn submit_shipping(&mut self) -> Result<(), CommerceError> {
        if self.step != CheckoutStep::Shipping {
            return Err(self.invalid_transition(CheckoutStep::Payment));
        }

        let missing = self.shipping.missing_fields();
        if !missing.is_empty() {
            warn!(?missing, "shipping form incomplete");
            return Err(CommerceError::missing(missing));
        }

        self.step = CheckoutStep::Payment;
        info!(step = %self.step, "shipping details accepted");
        Ok(())
    }

    /// Payment -> Shipping, keeping everything entered so far.
    pub fn back(&mut self) -> Result<(), CommerceError> {
        if self.step != CheckoutStep::Payment {
            return Err(self.invalid_transition(CheckoutStep::Shipping));
        }
        if self.in_flight.is_some() {
            return Err(CommerceError::SubmissionInFlight);
        }
        self.step = CheckoutStep::Shipping;
        Ok(())
    }

    /// Format raw payment input for `field` and store it.
    pub fn set_payment_field(&mut self, field: PaymentField, raw: &str) -> Result<(), CommerceError> {
        if self.step != CheckoutStep::Payment {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.to_string(),
                to: format!("edit {}", field),
            });
        }
        if self.in_flight.is_some() {
            return Err(CommerceError::SubmissionInFlight);
        }
        self.payment.set(field, raw);
        Ok(())
    }

    /// Validate the payment form and build the order for `cart`.
    ///
    /// Marks the flow as submitting until [`Self::finish_submission`] or
    /// [`Self::close`] is called.
    pub fn begin_submission(
        &mut self,
        cart: &Cart,
        display_currency: Currency,
    ) -> Result<OrderSubmission, CommerceError> {
        if self.step != CheckoutStep::Payment {
            return Err(self.invalid_transition(CheckoutStep::Success));
        }
        if self.in_flight.is_some() {
            warn!("rejected re-entrant order submission");
            return Err(CommerceError::SubmissionInFlight);
        }

        let missing = self.payment.missing_fields();
        if !missing.is_empty() {
            warn!(?missing, "payment form incomplete");
            return Err(CommerceError::missing(missing));
        }
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let order = NewOrder {
            order_number: generate_order_number(),
            customer_email: self.shipping.email.clone(),
            customer_name: self.shipping.full_name(),
            total_amount: cart.total(),
            currency: display_currency,
            status: OrderStatus::Completed,
            payment_status: PaymentStatus::Paid,
            shipping_address: self.shipping.shipping_address(),
        };
        let items = cart.items().iter().map(NewOrderItem::from).collect();

        self.next_ticket += 1;
        let ticket = SubmissionTicket(self.next_ticket);
        self.in_flight = Some(ticket);
        self.last_error = None;
        info!(order_number = %order.order_number, "submitting order");

        Ok(OrderSubmission {
            ticket,
            order,
            items,
        })
    }

    /// Apply the order store's answer for a submission.
    ///
    /// Success moves to the success step. Failure keeps the payment step and
    /// the whole draft so the shopper can retry. An answer for a ticket that
    /// is no longer current is discarded with [`CommerceError::StaleSubmission`].
    pub fn finish_submission(
        &mut self,
        submission: &OrderSubmission,
        result: Result<OrderId, CommerceError>,
    ) -> Result<OrderConfirmation, CommerceError> {
        if self.in_flight != Some(submission.ticket) {
            warn!(
                order_number = %submission.order.order_number,
                "discarding result of abandoned submission"
            );
            return Err(CommerceError::StaleSubmission);
        }
        self.in_flight = None;

        match result {
            Ok(order_id) => {
                let confirmation = OrderConfirmation {
                    order_id,
                    order_number: submission.order.order_number.clone(),
                    email: submission.order.customer_email.clone(),
                };
                self.step = CheckoutStep::Success;
                self.confirmation = Some(confirmation.clone());
                info!(order_number = %confirmation.order_number, "order placed");
                Ok(confirmation)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Submit the payment form and persist the order through `store`.
    pub async fn submit_payment<S>(
        &mut self,
        cart: &Cart,
        display_currency: Currency,
        store: &S,
    ) -> Result<OrderConfirmation, CommerceError>
    where
        S: OrderStore + ?Sized,
    {
        let submission = self.begin_submission(cart, display_currency)?;
        let result = submit_order(store, &submission).await;
        self.finish_submission(&submission, result)
    }

    /// Close the dialog from any step and reset the draft.
    ///
    /// Returns the step the flow was in, so the caller can clear the cart
    /// after a successful order.
    pub fn close(&mut self) -> CheckoutStep {
        let previous = self.step;
        if let Some(ticket) = self.in_flight.take() {
            warn!(ticket = ticket.0, "checkout closed with a submission pending");
        }
        self.step = CheckoutStep::Closed;
        self.shipping = ShippingInfo::default();
        self.payment = PaymentInfo::default();
        self.confirmation = None;
        self.last_error = None;
        previous
    }

    fn require_editable(&self) -> Result<(), CommerceError> {
        match self.step {
            CheckoutStep::Shipping | CheckoutStep::Payment if self.in_flight.is_some() => {
                Err(CommerceError::SubmissionInFlight)
            }
            CheckoutStep::Shipping | CheckoutStep::Payment => Ok(()),
            other => Err(CommerceError::InvalidCheckoutTransition {
                from: other.to_string(),
                to: "edit shipping".to_string(),
            }),
        }
    }

    fn invalid_transition(&self, to: CheckoutStep) -> CommerceError {
        CommerceError::InvalidCheckoutTransition {
            from: self.step.to_string(),
            to: to.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::money::Money;

    fn shipping() -> ShippingInfo {
        ShippingInfo {
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address: "12 St James's Square".to_string(),
            city: "London".to_string(),
            country: "United Kingdom".to_string(),
            postal_code: "SW1Y 4JH".to_string(),
        }
    }

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(&Product::new("1", "Tee", Money::base(55), "T-Shirts"), Some("M"));
        cart
    }

    fn at_payment() -> CheckoutFlow {
        let mut flow = CheckoutFlow::new();
        flow.open().unwrap();
        flow.set_shipping(shipping()).unwrap();
        flow.submit_shipping().unwrap();
        flow
    }

    fn fill_payment(flow: &mut CheckoutFlow) {
        flow.set_payment_field(PaymentField::CardNumber, "4111111111111111").unwrap();
        flow.set_payment_field(PaymentField::CardName, "Ada Lovelace").unwrap();
        flow.set_payment_field(PaymentField::ExpiryDate, "1229").unwrap();
        flow.set_payment_field(PaymentField::Cvv, "123").unwrap();
    }

    #[test]
    fn test_checkout_creation() {
        let flow = CheckoutFlow::new();
        assert_eq!(flow.step(), CheckoutStep::Closed);
        assert!(!flow.is_open());
    }

    #[test]
    fn test_open_twice_fails() {
        let mut flow = CheckoutFlow::new();
        flow.open().unwrap();
        assert!(matches!(
            flow.open(),
            Err(CommerceError::InvalidCheckoutTransition { .. })
        ));
    }

    #[test]
    fn test_blank_shipping_field_blocks() {
        for field in ShippingField::ALL {
            let mut flow = CheckoutFlow::new();
            flow.open().unwrap();
            flow.set_shipping(shipping()).unwrap();
            flow.set_shipping_field(field, "").unwrap();

            let err = flow.submit_shipping().unwrap_err();
            assert!(matches!(err, CommerceError::Validation { ref missing } if missing == &vec![field.as_str()]));
            assert_eq!(flow.step(), CheckoutStep::Shipping);
        }
    }

    #[test]
    fn test_back_preserves_shipping() {
        let mut flow = at_payment();
        assert_eq!(flow.step(), CheckoutStep::Payment);

        flow.back().unwrap();
        assert_eq!(flow.step(), CheckoutStep::Shipping);
        assert_eq!(flow.shipping(), &shipping());

        flow.submit_shipping().unwrap();
        assert_eq!(flow.step(), CheckoutStep::Payment);
    }

    #[test]
    fn test_payment_fields_formatted() {
        let mut flow = at_payment();
        fill_payment(&mut flow);
        assert_eq!(flow.payment().card_number, "4111 1111 1111 1111");
        assert_eq!(flow.payment().expiry_date, "12/29");
    }

    #[test]
    fn test_payment_field_outside_payment_step() {
        let mut flow = CheckoutFlow::new();
        flow.open().unwrap();
        assert!(flow.set_payment_field(PaymentField::Cvv, "123").is_err());
    }

    #[test]
    fn test_incomplete_payment_blocks_submission() {
        let mut flow = at_payment();
        flow.set_payment_field(PaymentField::CardNumber, "4111111111111111").unwrap();

        let err = flow.begin_submission(&cart(), Currency::USD).unwrap_err();
        assert!(matches!(err, CommerceError::Validation { .. }));
        assert!(!flow.is_submitting());
    }

    #[test]
    fn test_submission_builds_order() {
        let mut flow = at_payment();
        fill_payment(&mut flow);

        let submission = flow.begin_submission(&cart(), Currency::EUR).unwrap();
        assert!(flow.is_submitting());
        assert_eq!(submission.order.customer_name, "Ada Lovelace");
        assert_eq!(submission.order.total_amount, Money::base(55));
        assert_eq!(submission.order.currency, Currency::EUR);
        assert_eq!(submission.order.status, OrderStatus::Completed);
        assert_eq!(submission.items.len(), 1);
        assert_eq!(submission.items[0].size.as_deref(), Some("M"));
        assert_eq!(submission.items[0].unit_price, Money::base(55));
    }

    #[test]
    fn test_reentrant_submission_rejected() {
        let mut flow = at_payment();
        fill_payment(&mut flow);

        let first = flow.begin_submission(&cart(), Currency::USD).unwrap();
        assert!(matches!(
            flow.begin_submission(&cart(), Currency::USD),
            Err(CommerceError::SubmissionInFlight)
        ));
        assert!(matches!(flow.back(), Err(CommerceError::SubmissionInFlight)));

        let confirmation = flow
            .finish_submission(&first, Ok(OrderId::new("order-1")))
            .unwrap();
        assert_eq!(confirmation.order_number, first.order.order_number);
        assert_eq!(flow.step(), CheckoutStep::Success);
    }

    #[test]
    fn test_draft_frozen_while_submitting() {
        let mut flow = at_payment();
        fill_payment(&mut flow);
        let submission = flow.begin_submission(&cart(), Currency::USD).unwrap();

        assert!(matches!(
            flow.set_shipping_field(ShippingField::Email, "changed@example.com"),
            Err(CommerceError::SubmissionInFlight)
        ));
        assert!(matches!(
            flow.set_shipping(ShippingInfo::default()),
            Err(CommerceError::SubmissionInFlight)
        ));
        assert!(matches!(
            flow.set_payment_field(PaymentField::Cvv, "999"),
            Err(CommerceError::SubmissionInFlight)
        ));

        flow.finish_submission(&submission, Err(CommerceError::Submission("timeout".to_string())))
            .unwrap_err();
        assert_eq!(flow.shipping().email, submission.order.customer_email);
        assert_eq!(flow.payment().cvv, "123");

        // Editable again once the submission resolved.
        flow.set_payment_field(PaymentField::Cvv, "999").unwrap();
    }

    #[test]
    fn test_failed_submission_keeps_draft() {
        let mut flow = at_payment();
        fill_payment(&mut flow);

        let submission = flow.begin_submission(&cart(), Currency::USD).unwrap();
        let result = flow.finish_submission(
            &submission,
            Err(CommerceError::Submission("store offline".to_string())),
        );

        assert!(result.is_err());
        assert_eq!(flow.step(), CheckoutStep::Payment);
        assert!(!flow.is_submitting());
        assert_eq!(flow.payment().cvv, "123");
        assert!(flow.last_error().unwrap().contains("store offline"));

        // Retry is allowed.
        assert!(flow.begin_submission(&cart(), Currency::USD).is_ok());
    }

    #[test]
    fn test_close_discards_pending_result() {
        let mut flow = at_payment();
        fill_payment(&mut flow);
        let submission = flow.begin_submission(&cart(), Currency::USD).unwrap();

        assert_eq!(flow.close(), CheckoutStep::Payment);
        assert_eq!(flow.shipping(), &ShippingInfo::default());

        flow.open().unwrap();
        let late = flow.finish_submission(&submission, Ok(OrderId::new("order-1")));
        assert!(matches!(late, Err(CommerceError::StaleSubmission)));
        assert_eq!(flow.step(), CheckoutStep::Shipping);
        assert!(flow.confirmation().is_none());
    }

    #[test]
    fn test_close_after_success_resets() {
        let mut flow = at_payment();
        fill_payment(&mut flow);
        let submission = flow.begin_submission(&cart(), Currency::USD).unwrap();
        flow.finish_submission(&submission, Ok(OrderId::new("order-1")))
            .unwrap();
        assert_eq!(flow.confirmation().unwrap().email, "ada@example.com");

        assert_eq!(flow.close(), CheckoutStep::Success);
        assert_eq!(flow.step(), CheckoutStep::Closed);
        assert!(flow.confirmation().is_none());
        assert_eq!(flow.payment(), &PaymentInfo::default());
    }

    #[test]
    fn test_empty_cart_cannot_submit() {
        let mut flow = at_payment();
        fill_payment(&mut flow);
        assert!(matches!(
            flow.begin_submission(&Cart::new(), Currency::USD),
            Err(CommerceError::EmptyCart)
        ));
    }
}
