//! Error types for the session actor.

use crate::model::CartError;
use crate::tracking_actor::TrackingError;
use thiserror::Error;

/// Errors that can occur during session operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    /// Not a whole number between 1 and the highest table number. Non-fatal.
    #[error("Invalid table number: {0:?}")]
    InvalidTableNumber(String),

    #[error("Cart line not found: {0}")]
    LineNotFound(String),

    #[error("Menu item is unavailable: {0}")]
    ItemUnavailable(String),

    #[error("Cannot check out an empty cart")]
    EmptyCart,

    #[error("Table number must be set before checkout")]
    TableNotSet,

    /// The order could not be registered for tracking; the cart was left as it was.
    #[error("Order tracking failed: {0}")]
    Tracking(#[from] TrackingError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),

    #[error("Unexpected reply to {0}")]
    UnexpectedReply(&'static str),
}

impl From<CartError> for SessionError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::InvalidTableNumber(input) => SessionError::InvalidTableNumber(input),
            CartError::LineNotFound(line) => SessionError::LineNotFound(line),
            CartError::ItemUnavailable(item) => SessionError::ItemUnavailable(item),
            CartError::EmptyCart => SessionError::EmptyCart,
            CartError::TableNotSet => SessionError::TableNotSet,
        }
    }
}

impl From<String> for SessionError {
    fn from(msg: String) -> Self {
        SessionError::ActorCommunicationError(msg)
    }
}
