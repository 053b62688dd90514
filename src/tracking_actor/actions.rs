//! Custom actions for the tracking actor.
//!
//! Every registry operation other than reads is an action on one
//! [`TrackedOrder`](crate::model::TrackedOrder), so each one runs to completion before the
//! next request is looked at.

use crate::model::{OrderStatus, OrderUpdate};

#[derive(Debug, Clone)]
pub enum TrackingAction {
    /// Mark the order as subscribed, creating a `pending` record if there is none.
    Subscribe,
    /// Clear the subscribed flag. The record stays.
    Unsubscribe,
    /// Overwrite the status. Creates the record if needed.
    Transition {
        status: OrderStatus,
        message: Option<String>,
    },
    /// Move a subscribed, non-terminal order one step along the lifecycle.
    Advance,
}

/// Results from [`TrackingAction`]s, variants match 1:1.
#[derive(Debug, Clone)]
pub enum TrackingActionResult {
    Subscribe(OrderUpdate),
    /// `true` if the order was subscribed before.
    Unsubscribe(bool),
    Transition(OrderUpdate),
    /// `None` when the order was not eligible to advance.
    Advance(Option<OrderUpdate>),
}
