//! # Tableside
//!
//! Service core for table-side food ordering: a menu, one cart per table, checkout, and
//! live order tracking driven by a simulated kitchen.
//!
//! ## Design
//!
//! State lives in actors from [`tableside_actor`]. Each actor owns a keyed store and
//! handles requests one at a time, so nothing here takes a lock on domain state.
//!
//! - The **tracking actor** ([`tracking_actor`]) keeps one
//!   [`TrackedOrder`](model::TrackedOrder) per order id, with its subscription flag. A
//!   status transition and its notification happen in the same message, so no reader sees
//!   one without the other.
//! - The **session actor** ([`session_actor`]) keeps one [`Session`](model::Session) per
//!   table: cart lines, table number, favorites, theme, current order. Checkout registers
//!   the order with the tracking actor before the cart is cleared.
//! - The **simulator** ([`simulator`]) ticks on a fixed period and, for each subscribed
//!   order, randomly asks the tracking actor to advance it one step.
//! - **Notifications** ([`notify`]) are logged and broadcast to listeners.
//!
//! Dependencies (clients, [`Clock`](clock::Clock), the notification sink) are handed to each
//! actor when it starts, which keeps every piece testable in isolation. See
//! [`TablesideSystem`](lifecycle::TablesideSystem) for the wiring.
//!
//! ## Module Tour
//!
//! | Module | Role |
//! |---|---|
//! | [`model`] | plain data: statuses, orders, cart lines, sessions, menu |
//! | [`tracking_actor`], [`session_actor`] | `ActorEntity` impls, actions, errors |
//! | [`clients`] | typed clients over `ResourceClient` |
//! | [`simulator`] | the status progression task |
//! | [`notify`] | notifications and the broadcast sink |
//! | [`api`] | axum routes |
//! | [`lifecycle`] | system wiring, shutdown, tracing setup |
//! | [`config`] | environment configuration |
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! TICK_INTERVAL_MS=1000 ACTIVATION_PROBABILITY=0.5 cargo run
//! ```

pub mod api;
pub mod clients;
pub mod clock;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod session_actor;
pub mod simulator;
pub mod tracking_actor;
