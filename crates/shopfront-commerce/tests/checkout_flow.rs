//! End-to-end storefront sessions against the in-memory order store.

use std::sync::Arc;

use shopfront_commerce::checkout::is_order_number;
use shopfront_commerce::prelude::*;

fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::builtin())
}

fn complete_shipping(session: &mut Session) {
    let flow = session.checkout_mut();
    flow.set_shipping_field(ShippingField::Email, "shopper@example.com").unwrap();
    flow.set_shipping_field(ShippingField::FirstName, "Grace").unwrap();
    flow.set_shipping_field(ShippingField::LastName, "Hopper").unwrap();
    flow.set_shipping_field(ShippingField::Address, "1 Navy Way").unwrap();
    flow.set_shipping_field(ShippingField::City, "Arlington").unwrap();
    flow.set_shipping_field(ShippingField::Country, "US").unwrap();
    flow.set_shipping_field(ShippingField::PostalCode, "22202").unwrap();
}

fn complete_payment(session: &mut Session) {
    let flow = session.checkout_mut();
    flow.set_payment_field(PaymentField::CardNumber, "4111111111111111").unwrap();
    flow.set_payment_field(PaymentField::CardName, "Grace Hopper").unwrap();
    flow.set_payment_field(PaymentField::ExpiryDate, "1225").unwrap();
    flow.set_payment_field(PaymentField::Cvv, "12a3").unwrap();
}

/// Cap (no size) twice and a tee in M once.
fn filled_session() -> Session {
    let mut session = Session::new(catalog());
    let cap = ProductId::new("13");
    let tee = ProductId::new("1");
    session.add_to_cart(&cap, None).unwrap();
    session.add_to_cart(&tee, Some("M")).unwrap();
    session.add_to_cart(&cap, None).unwrap();
    session
}

fn at_payment() -> Session {
    let mut session = filled_session();
    session.open_checkout().unwrap();
    complete_shipping(&mut session);
    session.checkout_mut().submit_shipping().unwrap();
    complete_payment(&mut session);
    session
}

#[test]
fn test_repeated_adds_merge_by_key() {
    let session = filled_session();
    let cart = session.cart();

    assert_eq!(cart.line_count(), 2);
    assert_eq!(
        cart.get(&LineKey::unsized_product(ProductId::new("13"))).unwrap().quantity,
        2
    );
    assert_eq!(
        cart.get(&LineKey::new(ProductId::new("1"), Some("M"))).unwrap().quantity,
        1
    );
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.total(), Money::base(45 * 2 + 55));
}

#[test]
fn test_total_ignores_insertion_order() {
    let mut forward = Session::new(catalog());
    let mut backward = Session::new(catalog());
    let picks = [("1", Some("S")), ("20", None), ("12", Some("XL")), ("17", None)];

    for (id, size) in picks {
        forward.add_to_cart(&ProductId::new(id), size).unwrap();
    }
    for (id, size) in picks.iter().rev() {
        backward.add_to_cart(&ProductId::new(*id), *size).unwrap();
    }

    assert_eq!(forward.cart().total(), backward.cart().total());
}

#[test]
fn test_zero_quantity_removes_line() {
    let mut session = filled_session();
    assert!(session.update_quantity(&ProductId::new("1"), 0, Some("M")));
    assert_eq!(session.cart().line_count(), 1);
    assert_eq!(session.cart().item_count(), 2);
}

#[test]
fn test_shipping_gate_and_back() {
    let mut session = filled_session();
    session.open_checkout().unwrap();
    assert_eq!(session.checkout().step().title(), "CHECKOUT");

    complete_shipping(&mut session);
    session
        .checkout_mut()
        .set_shipping_field(ShippingField::City, " ")
        .unwrap();
    let err = session.checkout_mut().submit_shipping().unwrap_err();
    assert_eq!(err.to_string(), "Missing required fields: city");
    assert_eq!(session.checkout().step(), CheckoutStep::Shipping);

    session
        .checkout_mut()
        .set_shipping_field(ShippingField::City, "Arlington")
        .unwrap();
    session.checkout_mut().submit_shipping().unwrap();
    assert_eq!(session.checkout().step().title(), "PAYMENT");

    session.checkout_mut().back().unwrap();
    assert_eq!(session.checkout().step(), CheckoutStep::Shipping);
    assert_eq!(session.checkout().shipping().city, "Arlington");
    assert_eq!(session.checkout().shipping().full_name(), "Grace Hopper");
}

#[tokio::test]
async fn test_successful_order() {
    let store = InMemoryOrderStore::new();
    let mut session = at_payment();
    session.set_currency(Currency::GBP);

    let confirmation = session.place_order(&store).await.unwrap();

    assert!(is_order_number(&confirmation.order_number));
    assert_eq!(confirmation.email, "shopper@example.com");
    assert!(session.cart().is_empty());
    assert_eq!(session.checkout().step().title(), "ORDER COMPLETE");

    let orders = store.orders().await;
    assert_eq!(orders.len(), 1);
    let header = &orders[0].order;
    assert_eq!(header.customer_name, "Grace Hopper");
    assert_eq!(header.total_amount, Money::base(145));
    assert_eq!(header.currency, Currency::GBP);
    assert_eq!(header.status, OrderStatus::Completed);
    assert_eq!(header.payment_status, PaymentStatus::Paid);
    assert_eq!(header.shipping_address.postal_code, "22202");

    let items = store.items_for(&confirmation.order_id).await;
    assert_eq!(items.len(), 2);
    assert_eq!(items.iter().map(|i| i.quantity).sum::<i64>(), 3);

    session.close_checkout();
    assert_eq!(session.checkout().step(), CheckoutStep::Closed);
    assert!(session.checkout().confirmation().is_none());
}

#[tokio::test]
async fn test_rejected_order_keeps_cart_and_step() {
    let store = InMemoryOrderStore::new().fail_header(true);
    let mut session = at_payment();
    let cart_before = session.cart().clone();

    let err = session.place_order(&store).await.unwrap_err();

    assert!(matches!(err, CommerceError::Submission(_)));
    assert_eq!(session.cart(), &cart_before);
    assert_eq!(session.checkout().step(), CheckoutStep::Payment);
    assert!(!session.checkout().is_submitting());
    assert_eq!(store.item_count().await, 0);
}

#[tokio::test]
async fn test_partial_persistence_reports_order() {
    let store = InMemoryOrderStore::new().fail_items(true);
    let mut session = at_payment();
    let cart_before = session.cart().clone();

    let err = session.place_order(&store).await.unwrap_err();

    let orders = store.orders().await;
    assert_eq!(orders.len(), 1);
    match err {
        CommerceError::PartialPersistence { order_id, .. } => {
            assert_eq!(order_id, orders[0].id.as_str());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(session.cart(), &cart_before);
    assert_eq!(session.checkout().step(), CheckoutStep::Payment);
}

#[tokio::test]
async fn test_retry_after_failure() {
    let failing = InMemoryOrderStore::new().fail_header(true);
    let working = InMemoryOrderStore::new();
    let mut session = at_payment();

    assert!(session.place_order(&failing).await.is_err());
    let confirmation = session.place_order(&working).await.unwrap();

    assert_eq!(working.orders().await[0].id, confirmation.order_id);
    assert!(session.cart().is_empty());
}

#[tokio::test]
async fn test_single_flight_submission() {
    let store = InMemoryOrderStore::new();
    let mut session = at_payment();
    let currency = session.currency();
    let cart = session.cart().clone();

    let submission = session
        .checkout_mut()
        .begin_submission(&cart, currency)
        .unwrap();
    assert!(matches!(
        session.checkout_mut().begin_submission(&cart, currency),
        Err(CommerceError::SubmissionInFlight)
    ));

    let result = shopfront_commerce::checkout::submit_order(&store, &submission).await;
    session
        .checkout_mut()
        .finish_submission(&submission, result)
        .unwrap();

    assert_eq!(store.orders().await.len(), 1);
    assert_eq!(session.checkout().step(), CheckoutStep::Success);
}

#[tokio::test]
async fn test_close_while_submitting_discards_result() {
    let store = InMemoryOrderStore::new();
    let mut session = at_payment();
    let currency = session.currency();
    let cart = session.cart().clone();

    let submission = session
        .checkout_mut()
        .begin_submission(&cart, currency)
        .unwrap();
    assert_eq!(session.close_checkout(), CheckoutStep::Payment);
    session.open_checkout().unwrap();

    let result = shopfront_commerce::checkout::submit_order(&store, &submission).await;
    let late = session.checkout_mut().finish_submission(&submission, result);

    assert!(matches!(late, Err(CommerceError::StaleSubmission)));
    assert_eq!(session.checkout().step(), CheckoutStep::Shipping);
    assert_eq!(session.checkout().shipping(), &ShippingInfo::default());
    assert_eq!(session.cart(), &cart);
}

#[test]
fn test_price_formatting() {
    assert_eq!(format_price(Money::base(100), "JPY"), "¥14,950");
    assert_eq!(format_price(Money::base(100), "EUR"), "€92.00");
    assert_eq!(format_price(Money::base(100), "ZZZ"), "$100.00");
}

#[test]
fn test_catalog_grouping_hides_undisplayed_categories() {
    let catalog = Catalog::builtin();
    let groups = catalog.grouped();
    let names: Vec<&str> = groups.iter().map(|g| g.category).collect();

    assert_eq!(names, vec!["T-Shirts", "Hoodies", "Caps", "Hats", "Womens Crop Tops"]);
    assert!(groups
        .iter()
        .flat_map(|g| g.products.iter())
        .all(|p| p.category != "Beanies"));
}
