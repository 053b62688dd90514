//! Axum router for the HTTP facade.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::api::state::AppState;

/// Build the router.
///
/// - `POST /api/orders`, `GET /api/orders` -- mock order creation and listing
/// - `GET /api/orders/{id}`, `PATCH /api/orders/{id}` -- mock order detail and status update
/// - `GET /api/menu`, `GET /api/menu/{id}` -- the catalog
/// - `GET /api/tracking`, `GET /api/tracking/{id}` -- live order status
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route(
            "/api/orders/{id}",
            get(handlers::get_order).patch(handlers::update_order),
        )
        .route("/api/menu", get(handlers::list_menu))
        .route("/api/menu/{id}", get(handlers::get_menu_item))
        .route("/api/tracking", get(handlers::list_tracking))
        .route("/api/tracking/{id}", get(handlers::get_tracking))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
