//! Cart lines and the totals derived from them.

use crate::model::MenuItem;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifies one line of one cart. Two lines may hold the same menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartLineId(pub u64);

impl Display for CartLineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartLineId,
    pub menu_item: MenuItem,
    /// Always at least 1.
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl CartItem {
    pub fn line_total(&self) -> Decimal {
        self.menu_item.price * Decimal::from(self.quantity)
    }
}

/// Tax and service rates applied to a subtotal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingRates {
    pub tax: Decimal,
    pub service: Decimal,
}

impl Default for PricingRates {
    fn default() -> Self {
        Self {
            tax: Decimal::new(8, 2),
            service: Decimal::new(18, 2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub service_charge: Decimal,
    pub total: Decimal,
}

/// Round to cents, halves away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Totals for `items`. Tax and service are each rounded before being summed into the total.
pub fn compute_totals(items: &[CartItem], rates: &PricingRates) -> Totals {
    let subtotal = round_money(items.iter().map(CartItem::line_total).sum());
    let tax = round_money(subtotal * rates.tax);
    let service_charge = round_money(subtotal * rates.service);
    Totals {
        subtotal,
        tax,
        service_charge,
        total: subtotal + tax + service_charge,
    }
}
