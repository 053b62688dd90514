//! Custom actions for the session actor.
//!
//! Reads (table number, theme, favorites) go through a plain `get`; table number and theme
//! changes go through `update`. Everything that edits the cart or places an order is an
//! action.

use crate::model::{CartItem, CartLineId, MenuItem, Order, Totals};

#[derive(Debug, Clone)]
pub enum SessionAction {
    /// Append a line. `quantity` below 1 is stored as 1.
    AddToCart {
        item: MenuItem,
        quantity: u32,
        special_instructions: Option<String>,
    },
    /// Set a line's quantity, clamped to at least 1.
    UpdateQuantity { line: CartLineId, quantity: i64 },
    RemoveFromCart(CartLineId),
    ToggleFavorite(String),
    Totals,
    /// Turn the cart into an order and start tracking it.
    Checkout { special_instructions: Option<String> },
}

/// Results from [`SessionAction`]s, variants match 1:1.
#[derive(Debug, Clone)]
pub enum SessionActionResult {
    AddToCart(CartLineId),
    UpdateQuantity(CartItem),
    /// Whether a line was removed.
    RemoveFromCart(bool),
    /// The new favorite flag.
    ToggleFavorite(bool),
    Totals(Totals),
    Checkout(Order),
}
