//! Dining sessions: one cart store per table, hosted by a single actor.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{SessionClient, TrackingClient};
use crate::clock::Clock;
use crate::model::{PricingRates, Session, SessionId, Theme};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tableside_actor::ResourceActor;

/// Payload for opening a session.
#[derive(Debug, Clone, Default)]
pub struct SessionCreate {
    pub table_number: Option<u32>,
    pub theme: Theme,
}

/// Payload for changing a session's settings. `table_number` is raw guest input.
#[derive(Debug, Clone, Default)]
pub struct SessionUpdate {
    pub table_number: Option<String>,
    pub theme: Option<Theme>,
}

/// Dependencies of the session actor.
#[derive(Clone)]
pub struct SessionContext {
    pub tracking: TrackingClient,
    pub clock: Arc<dyn Clock>,
    pub rates: PricingRates,
    pub max_table_number: u32,
    /// Estimate printed on new orders.
    pub estimated_time: String,
}

/// Creates a new session actor and its client.
pub fn new() -> (ResourceActor<Session>, SessionClient) {
    let session_id_counter = Arc::new(AtomicU32::new(1));
    let next_session_id = move || SessionId(session_id_counter.fetch_add(1, Ordering::SeqCst));

    let (actor, generic_client) = ResourceActor::new(32, next_session_id);
    (actor, SessionClient::new(generic_client))
}
