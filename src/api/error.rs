//! Error responses for the HTTP facade.
//!
//! Every failure is answered with `{ "success": false, "message": ... }`.

use crate::tracking_actor::TrackingError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body could not be read as the expected JSON.
    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Tracking unavailable: {0}")]
    Tracking(#[from] TrackingError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Body failures are a 500 on these routes, not a 400.
            Self::MalformedBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Tracking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "success": false,
            "message": self.to_string(),
        });

        (status, axum::Json(body)).into_response()
    }
}
