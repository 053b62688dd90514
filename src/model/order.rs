//! Orders produced by checkout.

use crate::model::CartItem;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Key of a placed order, shared by the session that placed it and the tracking registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// `ORD-<epoch millis>-<session number>-<checkout sequence>`.
    ///
    /// The sequence counts checkouts within one session, so two orders placed by the same
    /// session in the same millisecond still get different ids.
    pub fn for_checkout(placed_at: DateTime<Utc>, session: u32, sequence: u32) -> Self {
        Self(format!(
            "ORD-{}-{}-{}",
            placed_at.timestamp_millis(),
            session,
            sequence
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for OrderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A checked-out cart.
///
/// The money fields are copied from [`compute_totals`](crate::model::compute_totals) at
/// checkout and never edited afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub table_number: u32,
    pub items: Vec<CartItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub service_charge: Decimal,
    pub total: Decimal,
    pub estimated_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    pub placed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_checkout_id_format() {
        let placed_at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let id = OrderId::for_checkout(placed_at, 4, 1);
        assert_eq!(id.as_str(), "ORD-1700000000123-4-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ORD-1700000000123-4-1\"");
        assert_ne!(id, OrderId::for_checkout(placed_at, 4, 2));
    }
}
