//! Request handlers.
//!
//! The `/api/orders` routes are mocks: they stamp and echo what they are given and keep
//! nothing. Persistence, validation and payment belong behind them once a backing store
//! exists. The menu and tracking routes read live state.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::model::{MenuItem, OrderId, OrderStatus};

/// Filters accepted by the order listing routes. Parsed but not applied.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    pub user_id: Option<String>,
    pub user_role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusPatch {
    pub status: OrderStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))
}

// ---------------------------------------------------------------------------
// Mock orders
// ---------------------------------------------------------------------------

/// Stamp an id, a `pending` status and timestamps onto the posted object and echo it.
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Value::Object(mut order) = body(payload)? else {
        return Err(ApiError::MalformedBody("expected a JSON object".to_owned()));
    };

    let now = state.clock.now();
    let id = format!("order_{}", now.timestamp_millis());
    order.insert("id".to_owned(), json!(id));
    order.insert("status".to_owned(), json!(OrderStatus::Pending));
    order.insert("createdAt".to_owned(), json!(now));
    order.insert("updatedAt".to_owned(), json!(now));

    info!(order_id = %id, "Mock order created");
    Ok(Json(json!({
        "success": true,
        "order": order,
        "message": "Order created successfully",
    })))
}

/// Acknowledge a status change without recording it.
pub async fn update_order(
    Path(id): Path<String>,
    payload: Result<Json<StatusPatch>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let StatusPatch { status } = body(payload)?;
    info!(order_id = %id, %status, "Mock order updated");
    Ok(Json(json!({
        "success": true,
        "message": format!("Order {id} updated to {status}"),
    })))
}

pub async fn list_orders(Query(query): Query<OrderQuery>) -> Json<Value> {
    debug!(?query, "Listing mock orders");
    Json(json!({
        "success": true,
        "orders": [
            mock_order("order_1", OrderStatus::Preparing),
            mock_order("order_2", OrderStatus::Delivered),
        ],
    }))
}

/// A fixed order carrying the requested id.
pub async fn get_order(Path(id): Path<String>, Query(query): Query<OrderQuery>) -> Json<Value> {
    debug!(order_id = %id, ?query, "Fetching mock order");
    Json(json!({
        "success": true,
        "order": mock_order(&id, OrderStatus::Preparing),
    }))
}

fn mock_order(id: &str, status: OrderStatus) -> Value {
    json!({
        "id": id,
        "tableNumber": 12,
        "status": status,
        "items": [
            { "name": "House Burger", "quantity": 2, "price": "15.99" },
            { "name": "Fresh Lemonade", "quantity": 1, "price": "4.50" },
        ],
        "total": "45.04",
        "createdAt": "2024-01-01T12:00:00Z",
    })
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

/// Menu items, optionally narrowed by `category` and a `q` text search.
pub async fn list_menu(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MenuQuery>,
) -> Json<Value> {
    let mut items: Vec<&MenuItem> = match query.category.as_deref() {
        Some(category) => state.menu.by_category(category).collect(),
        None => state.menu.items().iter().collect(),
    };
    if let Some(q) = query.q.as_deref() {
        items.retain(|item| item.matches(q));
    }

    Json(json!({
        "success": true,
        "categories": state.menu.categories(),
        "items": items,
    }))
}

pub async fn get_menu_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let item = state
        .menu
        .find(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Menu item {id}")))?;
    Ok(Json(json!({ "success": true, "item": item })))
}

// ---------------------------------------------------------------------------
// Tracking
// ---------------------------------------------------------------------------

pub async fn list_tracking(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let orders: BTreeMap<_, _> = state.tracking.active_orders().await?.into_iter().collect();
    Ok(Json(json!({ "success": true, "orders": orders })))
}

pub async fn get_tracking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let update = state
        .tracking
        .get_order(OrderId::from(id.clone()))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order {id}")))?;
    Ok(Json(json!({ "success": true, "order": update })))
}
