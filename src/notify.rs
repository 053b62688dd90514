//! User-visible notifications for order status changes.
//!
//! The tracking actor hands every transition of a subscribed order to a
//! [`NotificationSink`]. The production sink, [`BroadcastSink`], logs the notification and
//! fans it out to whoever is listening (the binary logs them; a UI transport would forward
//! them). No retry, no dedup.

use crate::model::{OrderId, OrderStatus};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::info;

/// How long a non-persistent notification stays on screen.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Default,
    Success,
    Destructive,
}

/// A call to action attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationAction {
    pub label: String,
    /// Where the action leads, e.g. `/tracking/ORD-1`.
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub order_id: OrderId,
    pub title: String,
    pub description: String,
    pub variant: Variant,
    pub action: Option<NotificationAction>,
    /// `None` means the notification stays until dismissed.
    pub duration: Option<Duration>,
}

impl Notification {
    /// The notification for `order_id` moving to `status` with the resolved `message`.
    ///
    /// Terminal statuses are persistent and get a styled variant. Everything else is
    /// ephemeral and links to the tracking view.
    pub fn for_transition(order_id: &OrderId, status: OrderStatus, message: &str) -> Self {
        let (variant, duration) = match status {
            OrderStatus::Delivered => (Variant::Success, None),
            OrderStatus::Cancelled => (Variant::Destructive, None),
            _ => (Variant::Default, Some(DEFAULT_DURATION)),
        };
        let action = (!status.is_terminal()).then(|| NotificationAction {
            label: "Track".to_string(),
            target: format!("/tracking/{order_id}"),
        });

        Self {
            order_id: order_id.clone(),
            title: status.title().to_string(),
            description: message.to_string(),
            variant,
            action,
            duration,
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.duration.is_none()
    }
}

/// Receives notifications. Implementations must not block.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Logs notifications and broadcasts them to subscribers.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    sender: broadcast::Sender<Notification>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// A receiver for every notification sent from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl NotificationSink for BroadcastSink {
    fn notify(&self, notification: Notification) {
        info!(
            order_id = %notification.order_id,
            title = %notification.title,
            variant = ?notification.variant,
            persistent = notification.is_persistent(),
            "{}",
            notification.description
        );
        // Err only means nobody is listening.
        let _ = self.sender.send(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_notifications_are_persistent() {
        let id = OrderId::from("ORD-1");
        let delivered = Notification::for_transition(&id, OrderStatus::Delivered, "Enjoy");
        assert!(delivered.is_persistent());
        assert_eq!(delivered.variant, Variant::Success);
        assert!(delivered.action.is_none());

        let cancelled = Notification::for_transition(&id, OrderStatus::Cancelled, "Sorry");
        assert_eq!(cancelled.variant, Variant::Destructive);

        let preparing = Notification::for_transition(&id, OrderStatus::Preparing, "Cooking");
        assert_eq!(preparing.duration, Some(DEFAULT_DURATION));
        assert_eq!(preparing.title, "Preparing Your Order");
        assert_eq!(preparing.action.unwrap().target, "/tracking/ORD-1");
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_subscriber() {
        let sink = BroadcastSink::new(8);
        let mut first = sink.subscribe();
        let mut second = sink.subscribe();

        let id = OrderId::from("ORD-2");
        sink.notify(Notification::for_transition(&id, OrderStatus::Ready, "Ready"));

        assert_eq!(first.recv().await.unwrap().description, "Ready");
        assert_eq!(second.recv().await.unwrap().title, "Order Ready");
    }

    #[test]
    fn test_notify_without_subscribers_is_fine() {
        let sink = BroadcastSink::new(1);
        let id = OrderId::from("ORD-3");
        sink.notify(Notification::for_transition(&id, OrderStatus::Confirmed, "ok"));
    }
}
