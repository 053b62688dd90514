//! [`ActorEntity`] implementation for [`TrackedOrder`].
//!
//! Records are keyed by the caller's [`OrderId`] and never created through `create`:
//! `Subscribe` and `Transition` materialize a `pending` record on first touch, while
//! `Unsubscribe` and `Advance` on an unknown id fail with `NotFound`, which the client turns
//! into a no-op.

use super::actions::{TrackingAction, TrackingActionResult};
use super::{TrackingContext, TrackingError};
use crate::model::{OrderId, OrderStatus, TrackedOrder};
use crate::notify::Notification;
use async_trait::async_trait;
use std::convert::Infallible;
use tableside_actor::ActorEntity;
use tracing::debug;

#[async_trait]
impl ActorEntity for TrackedOrder {
    type Id = OrderId;
    type Create = Infallible;
    type Update = Infallible;
    type Action = TrackingAction;
    type ActionResult = TrackingActionResult;
    type Context = TrackingContext;
    type Error = TrackingError;

    fn from_create_params(_id: OrderId, params: Infallible) -> Result<Self, Self::Error> {
        match params {}
    }

    fn on_missing(id: &OrderId, action: &TrackingAction, ctx: &TrackingContext) -> Option<Self> {
        match action {
            TrackingAction::Subscribe | TrackingAction::Transition { .. } => {
                Some(TrackedOrder::pending(id.clone(), ctx.clock.now()))
            }
            TrackingAction::Unsubscribe | TrackingAction::Advance => None,
        }
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &TrackingContext) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(
        &mut self,
        action: TrackingAction,
        ctx: &TrackingContext,
    ) -> Result<TrackingActionResult, Self::Error> {
        match action {
            TrackingAction::Subscribe => {
                self.subscribed = true;
                Ok(TrackingActionResult::Subscribe(self.update.clone()))
            }
            TrackingAction::Unsubscribe => {
                let was_subscribed = self.subscribed;
                self.subscribed = false;
                Ok(TrackingActionResult::Unsubscribe(was_subscribed))
            }
            TrackingAction::Transition { status, message } => {
                self.transition(status, message, ctx);
                Ok(TrackingActionResult::Transition(self.update.clone()))
            }
            TrackingAction::Advance => {
                let next = self.status().next().filter(|_| self.subscribed);
                let Some(next) = next else {
                    debug!(order_id = %self.update.order_id, status = %self.status(), "Not advancing");
                    return Ok(TrackingActionResult::Advance(None));
                };
                self.transition(next, None, ctx);
                Ok(TrackingActionResult::Advance(Some(self.update.clone())))
            }
        }
    }
}

impl TrackedOrder {
    /// Apply a transition and, if subscribed, notify in the same step.
    fn transition(
        &mut self,
        status: OrderStatus,
        message: Option<String>,
        ctx: &TrackingContext,
    ) {
        let message = self.apply_transition(status, message, ctx.clock.now(), ctx.rider_origin);
        if self.subscribed {
            ctx.sink.notify(Notification::for_transition(
                &self.update.order_id,
                status,
                &message,
            ));
        }
    }
}
