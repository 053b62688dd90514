//! Error types for the tracking actor.

use thiserror::Error;

/// Registry operations have no domain failures; only the actor plumbing can fail.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackingError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),

    /// The actor answered an action with a result for a different action.
    #[error("Unexpected reply to {0}")]
    UnexpectedReply(&'static str),
}

impl From<String> for TrackingError {
    fn from(msg: String) -> Self {
        TrackingError::ActorCommunicationError(msg)
    }
}
