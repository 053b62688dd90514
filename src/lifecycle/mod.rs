//! Runtime orchestration: wiring and stopping the actors, and logging setup.
//!
//! - [`TablesideSystem`] spawns the tracking and session actors, starts the simulator and
//!   shuts everything down in dependency order.
//! - [`setup_tracing`] initializes structured logging.

pub mod system;
pub mod tracing;

pub use self::tracing::setup_tracing;
pub use system::*;
