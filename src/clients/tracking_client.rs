use crate::model::{OrderId, OrderStatus, OrderUpdate, TrackedOrder};
use crate::tracking_actor::{TrackingAction, TrackingActionResult, TrackingError};
use async_trait::async_trait;
use std::collections::HashMap;
use tableside_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for the order status registry.
#[derive(Clone)]
pub struct TrackingClient {
    inner: ResourceClient<TrackedOrder>,
}

#[async_trait]
impl ActorClient<TrackedOrder> for TrackingClient {
    type Error = TrackingError;

    fn inner(&self) -> &ResourceClient<TrackedOrder> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        TrackingError::ActorCommunicationError(e.to_string())
    }
}

impl TrackingClient {
    pub fn new(inner: ResourceClient<TrackedOrder>) -> Self {
        Self { inner }
    }

    async fn act(
        &self,
        order_id: OrderId,
        action: TrackingAction,
    ) -> Result<TrackingActionResult, FrameworkError> {
        self.inner.perform_action(order_id, action).await
    }

    /// Start tracking an order. Idempotent, and never resets an order that has moved on.
    #[instrument(skip(self))]
    pub async fn subscribe_to_order(&self, order_id: OrderId) -> Result<OrderUpdate, TrackingError> {
        debug!("Sending request");
        match self.act(order_id, TrackingAction::Subscribe).await {
            Ok(TrackingActionResult::Subscribe(update)) => Ok(update),
            Ok(_) => Err(TrackingError::UnexpectedReply("Subscribe")),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Stop tracking an order. Returns whether it was subscribed; unknown ids are a no-op.
    #[instrument(skip(self))]
    pub async fn unsubscribe_from_order(&self, order_id: OrderId) -> Result<bool, TrackingError> {
        debug!("Sending request");
        match self.act(order_id, TrackingAction::Unsubscribe).await {
            Ok(TrackingActionResult::Unsubscribe(was_subscribed)) => Ok(was_subscribed),
            Ok(_) => Err(TrackingError::UnexpectedReply("Unsubscribe")),
            Err(FrameworkError::NotFound(_)) => Ok(false),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Overwrite an order's status. Any status is accepted, in any order.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
        message: Option<String>,
    ) -> Result<OrderUpdate, TrackingError> {
        debug!("Sending request");
        match self
            .act(order_id, TrackingAction::Transition { status, message })
            .await
        {
            Ok(TrackingActionResult::Transition(update)) => Ok(update),
            Ok(_) => Err(TrackingError::UnexpectedReply("Transition")),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Step a subscribed, non-terminal order to its next status.
    ///
    /// `None` if the order is unknown, unsubscribed or terminal.
    #[instrument(skip(self))]
    pub async fn advance(&self, order_id: OrderId) -> Result<Option<OrderUpdate>, TrackingError> {
        debug!("Sending request");
        match self.act(order_id, TrackingAction::Advance).await {
            Ok(TrackingActionResult::Advance(update)) => Ok(update),
            Ok(_) => Err(TrackingError::UnexpectedReply("Advance")),
            Err(FrameworkError::NotFound(_)) => Ok(None),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    pub async fn get_order(&self, order_id: OrderId) -> Result<Option<OrderUpdate>, TrackingError> {
        Ok(self.get(order_id).await?.map(|tracked| tracked.update))
    }

    /// Keyed snapshot of every tracked order, subscribed or not.
    pub async fn active_orders(&self) -> Result<HashMap<OrderId, OrderUpdate>, TrackingError> {
        let all = self.list().await?;
        Ok(all.into_iter().map(|(id, tracked)| (id, tracked.update)).collect())
    }

    /// Snapshot of the subscribed order ids, sorted.
    ///
    /// Only the ids are copied out of the actor.
    pub async fn subscribed_orders(&self) -> Result<Vec<OrderId>, TrackingError> {
        let mut ids = self
            .inner
            .list_ids(|tracked: &TrackedOrder| tracked.subscribed)
            .await
            .map_err(Self::map_error)?;
        ids.sort();
        Ok(ids)
    }
}
