//! Type-safe wrappers around [`ResourceClient`](tableside_actor::ResourceClient).

pub mod session_client;
pub mod tracking_client;

pub use session_client::*;
pub use tracking_client::*;
