//! The order lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Where an order is in its lifecycle.
///
/// The happy path is linear, `pending → confirmed → preparing → ready → picked_up →
/// delivered`. `cancelled` can be reached from any non-terminal status but only by an
/// explicit caller, never by the simulator. `delivered` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    PickedUp,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// The linear lifecycle, in order.
    pub const LIFECYCLE: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::PickedUp,
        OrderStatus::Delivered,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The status after this one on the lifecycle, if any.
    pub fn next(self) -> Option<OrderStatus> {
        let position = Self::LIFECYCLE.iter().position(|s| *s == self)?;
        Self::LIFECYCLE.get(position + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::PickedUp => "picked_up",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Headline used for notifications.
    pub fn title(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Order Received",
            OrderStatus::Confirmed => "Order Confirmed",
            OrderStatus::Preparing => "Preparing Your Order",
            OrderStatus::Ready => "Order Ready",
            OrderStatus::PickedUp => "On The Way",
            OrderStatus::Delivered => "Order Delivered",
            OrderStatus::Cancelled => "Order Cancelled",
        }
    }

    /// The message shown when a transition carries none of its own.
    pub fn canonical_message(self) -> &'static str {
        match self {
            OrderStatus::Pending => "We've received your order and are waiting for the kitchen.",
            OrderStatus::Confirmed => "The restaurant has confirmed your order.",
            OrderStatus::Preparing => "The kitchen is preparing your food.",
            OrderStatus::Ready => "Your order is ready and waiting for a rider.",
            OrderStatus::PickedUp => "Your rider has picked up your order.",
            OrderStatus::Delivered => "Your order has been delivered. Enjoy your meal!",
            OrderStatus::Cancelled => "Your order has been cancelled.",
        }
    }

    /// Rough time remaining, for statuses where one makes sense.
    pub fn estimated_time(self) -> Option<&'static str> {
        match self {
            OrderStatus::Pending => Some("25-30 minutes"),
            OrderStatus::Confirmed => Some("20-25 minutes"),
            OrderStatus::Preparing => Some("15-20 minutes"),
            OrderStatus::Ready => Some("10-15 minutes"),
            OrderStatus::PickedUp => Some("5-10 minutes"),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a status string outside the lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::LIFECYCLE
            .iter()
            .chain(std::iter::once(&OrderStatus::Cancelled))
            .find(|status| status.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_walks_the_lifecycle() {
        let mut status = OrderStatus::Pending;
        let mut seen = vec![status];
        while let Some(next) = status.next() {
            seen.push(next);
            status = next;
        }
        assert_eq!(seen, OrderStatus::LIFECYCLE.to_vec());
        assert_eq!(OrderStatus::Delivered.next(), None);
        assert_eq!(OrderStatus::Cancelled.next(), None);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::PickedUp.is_terminal());
    }

    #[test]
    fn test_wire_names_match_display_and_parse() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::PickedUp).unwrap(),
            "\"picked_up\""
        );
        assert_eq!("picked_up".parse::<OrderStatus>().unwrap(), OrderStatus::PickedUp);
        assert_eq!("cancelled".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
        assert!("shipped".parse::<OrderStatus>().is_err());
    }
}
