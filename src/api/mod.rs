//! HTTP facade: mock order routes plus read-only menu and tracking routes.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use server::{start_server, ServerError};
pub use state::AppState;
