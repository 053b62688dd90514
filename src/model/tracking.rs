//! Live status of a placed order.
//!
//! # Actor Framework
//! [`TrackedOrder`] implements [`ActorEntity`](tableside_actor::ActorEntity) and is hosted
//! by the tracking actor, one record per order id. See
//! [`tracking_actor`](crate::tracking_actor) for the actions it accepts.
use crate::model::{OrderId, OrderStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// The latest known state of one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub order_id: OrderId,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    /// Set when the order is picked up and kept from then on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rider_location: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Never decreases across successive updates of the same order.
    pub timestamp: DateTime<Utc>,
}

/// A tracking record plus its subscription flag.
///
/// Keeping the flag on the record means a subscribed id always has a record behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedOrder {
    #[serde(flatten)]
    pub update: OrderUpdate,
    pub subscribed: bool,
}

impl TrackedOrder {
    /// A fresh, unsubscribed `pending` record.
    pub fn pending(order_id: OrderId, now: DateTime<Utc>) -> Self {
        Self {
            update: OrderUpdate {
                order_id,
                status: OrderStatus::Pending,
                estimated_time: OrderStatus::Pending.estimated_time().map(str::to_string),
                rider_location: None,
                message: None,
                timestamp: now,
            },
            subscribed: false,
        }
    }

    pub fn status(&self) -> OrderStatus {
        self.update.status
    }

    /// Overwrite the record with a new status.
    ///
    /// Returns the message that was stored: the explicit one if given, otherwise the
    /// status's canonical message. The rider location is assigned from `rider_origin` the
    /// first time the order is picked up and never replaced.
    pub fn apply_transition(
        &mut self,
        status: OrderStatus,
        message: Option<String>,
        now: DateTime<Utc>,
        rider_origin: GeoPoint,
    ) -> String {
        let message = message.unwrap_or_else(|| status.canonical_message().to_string());

        self.update.status = status;
        self.update.message = Some(message.clone());
        self.update.estimated_time = status.estimated_time().map(str::to_string);
        self.update.timestamp = self.update.timestamp.max(now);
        if status == OrderStatus::PickedUp && self.update.rider_location.is_none() {
            self.update.rider_location = Some(rider_origin);
        }

        message
    }
}
