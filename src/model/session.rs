//! One table's dining session: cart, table number, favorites and theme.
//!
//! # Actor Framework
//! [`Session`] implements [`ActorEntity`](tableside_actor::ActorEntity) and is hosted by the
//! session actor. The reducer methods below are plain synchronous state changes; the
//! entity impl in [`session_actor`](crate::session_actor) routes actions onto them and
//! adds the parts that need other actors (checkout).

use crate::model::{compute_totals, CartItem, CartLineId, MenuItem, Order, OrderId, PricingRates, Totals};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;
use thiserror::Error;

/// Rejections from the session reducers.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Invalid table number: {0:?}")]
    InvalidTableNumber(String),

    #[error("Cart line not found: {0}")]
    LineNotFound(String),

    #[error("Menu item is unavailable: {0}")]
    ItemUnavailable(String),

    #[error("Cannot check out an empty cart")]
    EmptyCart,

    #[error("Table number must be set before checkout")]
    TableNotSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u32);

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub table_number: Option<u32>,
    pub cart: Vec<CartItem>,
    pub current_order: Option<Order>,
    pub theme: Theme,
    pub favorites: BTreeSet<String>,
    #[serde(skip)]
    next_line: u64,
    #[serde(skip)]
    next_order: u32,
}

/// Parse a table number typed by a guest.
pub fn parse_table_number(input: &str, max: u32) -> Result<u32, CartError> {
    let invalid = || CartError::InvalidTableNumber(input.to_string());
    let number: u32 = input.trim().parse().map_err(|_| invalid())?;
    check_table_number(number, max).map_err(|_| invalid())
}

/// Accept `number` if it lies in `1..=max`.
pub fn check_table_number(number: u32, max: u32) -> Result<u32, CartError> {
    if (1..=max).contains(&number) {
        Ok(number)
    } else {
        Err(CartError::InvalidTableNumber(number.to_string()))
    }
}

impl Session {
    pub fn new(id: SessionId, table_number: Option<u32>, theme: Theme) -> Self {
        Self {
            id,
            table_number,
            cart: Vec::new(),
            current_order: None,
            theme,
            favorites: BTreeSet::new(),
            next_line: 1,
            next_order: 1,
        }
    }

    /// Append a new line, even when the same menu item is already in the cart.
    ///
    /// Items marked unavailable are rejected and the cart is left as it was.
    pub fn add_to_cart(
        &mut self,
        menu_item: MenuItem,
        quantity: u32,
        special_instructions: Option<String>,
    ) -> Result<CartLineId, CartError> {
        if !menu_item.available {
            return Err(CartError::ItemUnavailable(menu_item.id));
        }
        let id = CartLineId(self.next_line);
        self.next_line += 1;
        self.cart.push(CartItem {
            id,
            menu_item,
            quantity: quantity.max(1),
            special_instructions,
        });
        Ok(id)
    }

    /// Set a line's quantity. Anything below 1 becomes 1.
    pub fn update_quantity(&mut self, line: CartLineId, quantity: i64) -> Result<&CartItem, CartError> {
        let item = self
            .cart
            .iter_mut()
            .find(|item| item.id == line)
            .ok_or_else(|| CartError::LineNotFound(line.to_string()))?;
        item.quantity = u32::try_from(quantity.max(1)).unwrap_or(u32::MAX);
        Ok(item)
    }

    /// Returns whether a line was removed.
    pub fn remove_from_cart(&mut self, line: CartLineId) -> bool {
        let before = self.cart.len();
        self.cart.retain(|item| item.id != line);
        self.cart.len() != before
    }

    /// Validate and store a table number. State is unchanged on error.
    pub fn set_table_number(&mut self, input: &str, max: u32) -> Result<u32, CartError> {
        let number = parse_table_number(input, max)?;
        self.table_number = Some(number);
        Ok(number)
    }

    /// Flip the favorite flag for a menu item and return the new value.
    pub fn toggle_favorite(&mut self, item_id: &str) -> bool {
        if self.favorites.remove(item_id) {
            false
        } else {
            self.favorites.insert(item_id.to_string());
            true
        }
    }

    pub fn is_favorite(&self, item_id: &str) -> bool {
        self.favorites.contains(item_id)
    }

    pub fn totals(&self, rates: &PricingRates) -> Totals {
        compute_totals(&self.cart, rates)
    }

    /// Build the order for the current cart without changing the session.
    ///
    /// The id carries this session's next checkout sequence, which only
    /// [`commit_order`](Self::commit_order) consumes.
    pub fn prepare_order(
        &self,
        special_instructions: Option<String>,
        placed_at: DateTime<Utc>,
        rates: &PricingRates,
        estimated_time: &str,
    ) -> Result<Order, CartError> {
        if self.cart.is_empty() {
            return Err(CartError::EmptyCart);
        }
        let table_number = self.table_number.ok_or(CartError::TableNotSet)?;
        let totals = self.totals(rates);

        Ok(Order {
            id: OrderId::for_checkout(placed_at, self.id.0, self.next_order),
            table_number,
            items: self.cart.clone(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            service_charge: totals.service_charge,
            total: totals.total,
            estimated_time: estimated_time.to_string(),
            special_instructions,
            placed_at,
        })
    }

    /// Clear the cart and remember `order` as the current one.
    pub fn commit_order(&mut self, order: Order) {
        self.next_order += 1;
        self.cart.clear();
        self.current_order = Some(order);
    }
}
