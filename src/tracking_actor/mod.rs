//! Order status registry: one [`TrackedOrder`](crate::model::TrackedOrder) per order id,
//! plus its subscription flag.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::TrackingClient;
use crate::clock::Clock;
use crate::model::{GeoPoint, TrackedOrder};
use crate::notify::NotificationSink;
use std::sync::Arc;
use tableside_actor::ResourceActor;

/// Where riders set off from. Assigned to an order when it is picked up.
pub const DISPATCH_ORIGIN: GeoPoint = GeoPoint {
    lat: 40.7128,
    lng: -74.006,
};

/// Dependencies of the tracking actor.
#[derive(Clone)]
pub struct TrackingContext {
    pub sink: Arc<dyn NotificationSink>,
    pub clock: Arc<dyn Clock>,
    pub rider_origin: GeoPoint,
}

impl TrackingContext {
    pub fn new(sink: Arc<dyn NotificationSink>, clock: Arc<dyn Clock>) -> Self {
        Self {
            sink,
            clock,
            rider_origin: DISPATCH_ORIGIN,
        }
    }
}

/// Creates a new tracking actor and its client.
pub fn new() -> (ResourceActor<TrackedOrder>, TrackingClient) {
    let (actor, generic_client) = ResourceActor::keyed(64);
    (actor, TrackingClient::new(generic_client))
}
