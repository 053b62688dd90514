//! HTTP routes exercised through the router directly with `tower::ServiceExt`, no TCP.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tableside::api::{build_router, AppState};
use tableside::clients::TrackingClient;
use tableside::clock::ManualClock;
use tableside::model::{Menu, OrderId, OrderStatus};
use tableside::notify::BroadcastSink;
use tableside::tracking_actor::{self, TrackingContext};
use tower::ServiceExt;

fn setup() -> (Router, TrackingClient) {
    let clock = Arc::new(ManualClock::new(
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
    ));
    let (actor, tracking) = tracking_actor::new();
    tokio::spawn(actor.run(TrackingContext::new(
        Arc::new(BroadcastSink::new(16)),
        clock.clone(),
    )));

    let state = Arc::new(AppState::new(clock, Menu::house(), tracking.clone()));
    (build_router(state), tracking)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

#[tokio::test]
async fn create_order_stamps_id_and_status() {
    let (router, _tracking) = setup();
    let payload = json!({ "tableNumber": 4, "items": [{ "id": "main-burger", "quantity": 2 }] });

    let response = router
        .oneshot(json_request("POST", "/api/orders", &payload.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["order"]["id"], "order_1700000000000");
    assert_eq!(json["order"]["status"], "pending");
    assert_eq!(json["order"]["tableNumber"], 4);
    assert_eq!(json["order"]["items"][0]["quantity"], 2);
    assert_eq!(json["order"]["createdAt"], json["order"]["updatedAt"]);
}

#[tokio::test]
async fn create_order_rejects_malformed_json() {
    let (router, _tracking) = setup();

    for body in ["{ not json", "[1, 2, 3]"] {
        let response = router
            .clone()
            .oneshot(json_request("POST", "/api/orders", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_to_json(response.into_body()).await;
        assert_eq!(json["success"], false);
        assert!(json["message"].is_string());
    }
}

#[tokio::test]
async fn update_order_acknowledges_known_statuses() {
    let (router, _tracking) = setup();

    let response = router
        .clone()
        .oneshot(json_request("PATCH", "/api/orders/order_1", r#"{"status":"ready"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Order order_1 updated to ready");

    let response = router
        .oneshot(json_request("PATCH", "/api/orders/order_1", r#"{"status":"shipped"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn order_listing_ignores_role_filters() {
    let (router, _tracking) = setup();

    let all = router.clone().oneshot(get("/api/orders")).await.unwrap();
    let filtered = router
        .clone()
        .oneshot(get("/api/orders?userId=u_1&userRole=admin"))
        .await
        .unwrap();
    assert_eq!(all.status(), StatusCode::OK);
    assert_eq!(
        body_to_json(all.into_body()).await,
        body_to_json(filtered.into_body()).await
    );

    let one = router.oneshot(get("/api/orders/order_42")).await.unwrap();
    let json = body_to_json(one.into_body()).await;
    assert_eq!(json["order"]["id"], "order_42");
}

#[tokio::test]
async fn menu_routes() {
    let (router, _tracking) = setup();

    let response = router.clone().oneshot(get("/api/menu?category=mains")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["items"].as_array().unwrap().len(), 3);

    let response = router.clone().oneshot(get("/api/menu?q=lemon&category=drinks")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["items"][0]["id"], "drink-lemonade");
    assert_eq!(json["items"].as_array().unwrap().len(), 1);

    let response = router.clone().oneshot(get("/api/menu/main-burger")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["item"]["price"], "15.99");

    let response = router.oneshot(get("/api/menu/main-pizza")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tracking_routes() {
    let (router, tracking) = setup();

    let response = router.clone().oneshot(get("/api/tracking/ORD-9")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], false);

    tracking.subscribe_to_order(OrderId::from("ORD-9")).await.unwrap();
    tracking
        .update_order_status(OrderId::from("ORD-7"), OrderStatus::PickedUp, None)
        .await
        .unwrap();

    let response = router.clone().oneshot(get("/api/tracking/ORD-9")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["order"]["orderId"], "ORD-9");
    assert_eq!(json["order"]["status"], "pending");

    let response = router.oneshot(get("/api/tracking")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["orders"]["ORD-7"]["status"], "picked_up");
    assert_eq!(json["orders"]["ORD-7"]["riderLocation"]["lat"], 40.7128);
    assert_eq!(json["orders"].as_object().unwrap().len(), 2);
}
