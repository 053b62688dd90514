//! Shared state for the HTTP handlers.

use crate::clients::TrackingClient;
use crate::clock::Clock;
use crate::model::Menu;
use std::sync::Arc;

pub struct AppState {
    pub clock: Arc<dyn Clock>,
    pub menu: Menu,
    pub tracking: TrackingClient,
}

impl AppState {
    pub fn new(clock: Arc<dyn Clock>, menu: Menu, tracking: TrackingClient) -> Self {
        Self {
            clock,
            menu,
            tracking,
        }
    }
}
