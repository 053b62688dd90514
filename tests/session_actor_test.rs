use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use tableside::clients::TrackingClient;
use tableside::clock::{Clock, ManualClock};
use tableside::model::{MenuItem, OrderId, OrderStatus, PricingRates, Theme, TrackedOrder};
use tableside::notify::BroadcastSink;
use tableside::session_actor::{self, SessionContext, SessionError};
use tableside::tracking_actor::{self, TrackingActionResult, TrackingContext, TrackingError};
use tableside_actor::mock::MockClient;
use tableside_actor::FrameworkError;

fn context(tracking: TrackingClient, clock: Arc<ManualClock>) -> SessionContext {
    SessionContext {
        tracking,
        clock,
        rates: PricingRates::default(),
        max_table_number: 50,
        estimated_time: "20-25 minutes".to_owned(),
    }
}

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
    ))
}

fn item(id: &str, price: rust_decimal::Decimal) -> MenuItem {
    MenuItem::new(id, id, "", price, "mains")
}

/// Real session actor with a mocked tracking actor.
///
/// Checkout must register the order for tracking with the id it derives from the clock
/// and the session number, then clear the cart.
#[tokio::test]
async fn test_checkout_subscribes_order_then_clears_cart() {
    let clock = clock();
    let expected_id = OrderId::from("ORD-1700000000000-1-1");

    let mut tracking_mock = MockClient::<TrackedOrder>::new();
    tracking_mock
        .expect_action(expected_id.clone())
        .return_ok(TrackingActionResult::Subscribe(
            TrackedOrder::pending(expected_id.clone(), clock.now()).update,
        ));

    let (actor, client) = session_actor::new();
    let handle = tokio::spawn(actor.run(context(
        TrackingClient::new(tracking_mock.client()),
        clock.clone(),
    )));

    let session = client.open_session(Some(4), Theme::Dark).await.unwrap();
    client.add_to_cart(session, item("burger", dec!(10)), 2, None).await.unwrap();
    client.add_to_cart(session, item("fries", dec!(5)), 1, None).await.unwrap();

    let order = client
        .checkout(session, Some("no onions".to_owned()))
        .await
        .unwrap();
    assert_eq!(order.id, expected_id);
    assert_eq!(order.table_number, 4);
    assert_eq!(order.subtotal, dec!(25));
    assert_eq!(order.total, dec!(31.50));
    assert_eq!(order.estimated_time, "20-25 minutes");
    assert_eq!(order.special_instructions.as_deref(), Some("no onions"));

    let state = client.session(session).await.unwrap();
    assert!(state.cart.is_empty());
    assert_eq!(state.current_order, Some(order));

    tracking_mock.verify();

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_failed_tracking_leaves_cart_untouched() {
    let clock = clock();
    let mut tracking_mock = MockClient::<TrackedOrder>::new();
    tracking_mock
        .expect_action(OrderId::from("ORD-1700000000000-1-1"))
        .return_err(FrameworkError::ActorClosed);

    let (actor, client) = session_actor::new();
    tokio::spawn(actor.run(context(TrackingClient::new(tracking_mock.client()), clock)));

    let session = client.open_session(Some(9), Theme::System).await.unwrap();
    client.add_to_cart(session, item("burger", dec!(10)), 1, None).await.unwrap();

    let err = client.checkout(session, None).await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Tracking(TrackingError::ActorCommunicationError(_))
    ));

    let state = client.session(session).await.unwrap();
    assert_eq!(state.cart.len(), 1);
    assert!(state.current_order.is_none());
    tracking_mock.verify();
}

/// Repeat checkouts from one session at a single clock instant each get their own tracking
/// record, starting at `pending`.
#[tokio::test]
async fn test_repeat_checkout_in_same_instant_gets_fresh_order() {
    let clock = clock();
    let (tracking_actor, tracking) = tracking_actor::new();
    tokio::spawn(tracking_actor.run(TrackingContext::new(
        Arc::new(BroadcastSink::new(16)),
        clock.clone(),
    )));

    let (actor, client) = session_actor::new();
    tokio::spawn(actor.run(context(tracking.clone(), clock)));

    let session = client.open_session(Some(4), Theme::System).await.unwrap();
    client.add_to_cart(session, item("burger", dec!(10)), 1, None).await.unwrap();
    let first = client.checkout(session, None).await.unwrap();
    tracking
        .update_order_status(first.id.clone(), OrderStatus::Delivered, None)
        .await
        .unwrap();

    client.add_to_cart(session, item("fries", dec!(5)), 1, None).await.unwrap();
    let second = client.checkout(session, None).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(second.id, OrderId::from("ORD-1700000000000-1-2"));
    assert_eq!(second.subtotal, dec!(5));

    let first_tracked = tracking.get_order(first.id.clone()).await.unwrap().unwrap();
    let second_tracked = tracking.get_order(second.id.clone()).await.unwrap().unwrap();
    assert_eq!(first_tracked.status, OrderStatus::Delivered);
    assert_eq!(second_tracked.status, OrderStatus::Pending);
    assert!(second_tracked.rider_location.is_none());
    assert_eq!(tracking.subscribed_orders().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_unavailable_item_is_refused() {
    let tracking_mock = MockClient::<TrackedOrder>::new();
    let (actor, client) = session_actor::new();
    tokio::spawn(actor.run(context(TrackingClient::new(tracking_mock.client()), clock())));

    let session = client.open_session(None, Theme::System).await.unwrap();
    let sold_out = item("sorbet", dec!(6)).unavailable();
    assert_eq!(
        client.add_to_cart(session, sold_out, 1, None).await.unwrap_err(),
        SessionError::ItemUnavailable("sorbet".to_owned())
    );
    assert!(client.session(session).await.unwrap().cart.is_empty());
    tracking_mock.verify();
}

/// Checkout preconditions fail before the tracking actor is contacted.
#[tokio::test]
async fn test_checkout_preconditions() {
    let tracking_mock = MockClient::<TrackedOrder>::new();
    let (actor, client) = session_actor::new();
    tokio::spawn(actor.run(context(TrackingClient::new(tracking_mock.client()), clock())));

    let session = client.open_session(None, Theme::System).await.unwrap();
    assert_eq!(
        client.checkout(session, None).await.unwrap_err(),
        SessionError::EmptyCart
    );

    client.add_to_cart(session, item("burger", dec!(10)), 1, None).await.unwrap();
    assert_eq!(
        client.checkout(session, None).await.unwrap_err(),
        SessionError::TableNotSet
    );

    tracking_mock.verify();
}

#[tokio::test]
async fn test_session_settings() {
    let tracking_mock = MockClient::<TrackedOrder>::new();
    let (actor, client) = session_actor::new();
    tokio::spawn(actor.run(context(TrackingClient::new(tracking_mock.client()), clock())));

    assert!(matches!(
        client.open_session(Some(51), Theme::System).await,
        Err(SessionError::InvalidTableNumber(_))
    ));

    let session = client.open_session(Some(3), Theme::Light).await.unwrap();
    assert!(matches!(
        client.set_table_number(session, "zero").await,
        Err(SessionError::InvalidTableNumber(_))
    ));
    assert_eq!(client.table_number(session).await.unwrap(), Some(3));
    assert_eq!(client.set_table_number(session, "17").await.unwrap(), 17);
    assert_eq!(client.table_number(session).await.unwrap(), Some(17));

    assert_eq!(client.theme(session).await.unwrap(), Theme::Light);
    assert_eq!(client.set_theme(session, Theme::Dark).await.unwrap(), Theme::Dark);

    assert!(client.toggle_favorite(session, "burger").await.unwrap());
    assert!(client.is_favorite(session, "burger").await.unwrap());
    assert!(!client.toggle_favorite(session, "burger").await.unwrap());
    assert!(!client.is_favorite(session, "burger").await.unwrap());

    client.end_session(session).await.unwrap();
    assert!(matches!(
        client.session(session).await,
        Err(SessionError::NotFound(_))
    ));
    assert!(matches!(
        client.end_session(session).await,
        Err(SessionError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_cart_edits() {
    let tracking_mock = MockClient::<TrackedOrder>::new();
    let (actor, client) = session_actor::new();
    tokio::spawn(actor.run(context(TrackingClient::new(tracking_mock.client()), clock())));

    let session = client.open_session(None, Theme::System).await.unwrap();
    let line = client
        .add_to_cart(session, item("steak", dec!(100)), 1, None)
        .await
        .unwrap();

    let totals = client.totals(session).await.unwrap();
    assert_eq!(totals.tax, dec!(8.00));
    assert_eq!(totals.service_charge, dec!(18.00));
    assert_eq!(totals.total, dec!(126.00));

    assert_eq!(client.update_quantity(session, line, 0).await.unwrap().quantity, 1);
    assert_eq!(client.update_quantity(session, line, -2).await.unwrap().quantity, 1);
    assert_eq!(client.update_quantity(session, line, 3).await.unwrap().quantity, 3);
    assert_eq!(client.totals(session).await.unwrap().subtotal, dec!(300));

    assert!(client.remove_from_cart(session, line).await.unwrap());
    assert!(!client.remove_from_cart(session, line).await.unwrap());
    assert!(matches!(
        client.update_quantity(session, line, 2).await,
        Err(SessionError::LineNotFound(_))
    ));
}
