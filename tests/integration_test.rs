use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use tableside::clock::ManualClock;
use tableside::config::TablesideConfig;
use tableside::lifecycle::TablesideSystem;
use tableside::model::{Menu, MenuItem, OrderStatus, Theme};
use tableside::session_actor::SessionError;
use tableside::simulator::{ActivationSource, StatusSimulator};

struct Always;

impl ActivationSource for Always {
    fn draw(&mut self) -> f64 {
        0.0
    }
}

/// Full end-to-end run with every real actor: order at a table, check out, follow the
/// order to delivery.
#[tokio::test]
async fn test_table_orders_and_tracks_to_delivery() {
    let clock = Arc::new(ManualClock::new(
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
    ));
    let system = TablesideSystem::with_clock(&TablesideConfig::default(), clock);
    let sessions = &system.session_client;
    let mut notifications = system.sink.subscribe();

    let session = sessions.open_session(None, Theme::System).await.unwrap();
    assert!(matches!(
        sessions.set_table_number(session, "seven").await,
        Err(SessionError::InvalidTableNumber(_))
    ));
    sessions.set_table_number(session, "7").await.unwrap();

    let burger = MenuItem::new("burger", "Burger", "", dec!(10), "mains");
    let fries = MenuItem::new("fries", "Fries", "", dec!(5), "sides");
    sessions.add_to_cart(session, burger, 2, None).await.unwrap();
    sessions.add_to_cart(session, fries, 1, None).await.unwrap();

    let totals = sessions.totals(session).await.unwrap();
    assert_eq!(totals.subtotal, dec!(25));
    assert_eq!(totals.tax, dec!(2.00));
    assert_eq!(totals.service_charge, dec!(4.50));
    assert_eq!(totals.total, dec!(31.50));

    let order = sessions.checkout(session, None).await.unwrap();
    assert_eq!(order.id.as_str(), "ORD-1700000000000-1-1");
    assert_eq!(order.total, dec!(31.50));
    assert!(sessions.session(session).await.unwrap().cart.is_empty());

    let tracked = system
        .tracking_client
        .get_order(order.id.clone())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(tracked.status, OrderStatus::Pending);
    assert_eq!(
        system.tracking_client.subscribed_orders().await.unwrap(),
        vec![order.id.clone()]
    );

    let mut simulator = StatusSimulator::new(system.tracking_client.clone(), Box::new(Always), 1.0);
    for _ in 0..5 {
        assert_eq!(simulator.tick().await.unwrap().advanced, 1);
    }
    drop(simulator);

    let delivered = system
        .tracking_client
        .get_order(order.id.clone())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert!(delivered.rider_location.is_some());

    let mut received = 0;
    while let Ok(note) = notifications.try_recv() {
        assert_eq!(note.order_id, order.id);
        received += 1;
    }
    assert_eq!(received, 5);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_house_menu_prices_flow_into_totals() {
    let system = TablesideSystem::new(&TablesideConfig::default());
    let menu = Menu::house();
    let session = system
        .session_client
        .open_session(Some(2), Theme::Light)
        .await
        .unwrap();

    let espresso = menu.find("drink-espresso").unwrap().clone();
    system
        .session_client
        .add_to_cart(session, espresso, 2, None)
        .await
        .unwrap();

    let totals = system.session_client.totals(session).await.unwrap();
    assert_eq!(totals.subtotal, dec!(6.00));
    assert_eq!(totals.tax, dec!(0.48));
    assert_eq!(totals.service_charge, dec!(1.08));
    assert_eq!(totals.total, dec!(7.56));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_stops_running_simulator() {
    let mut system = TablesideSystem::new(&TablesideConfig::default());
    system.start_simulation_with(Box::new(Always), 1.0, std::time::Duration::from_secs(3600));
    system.shutdown().await.unwrap();
}
