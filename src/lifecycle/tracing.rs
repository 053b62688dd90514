//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG` (default `info`). Module paths are hidden; actor log lines carry an
//! `entity_type` field instead.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: startup, shutdown and final store size
//! - **Entity operations**: create, get, list, update, delete and actions, with ids
//! - **Client calls**: one span per call on the domain clients
//! - **Notifications**: every notification sent to the sink, at `info`
//! - **Simulator**: ticks that advanced something at `info`, quiet ticks at `debug`
//! - **HTTP**: requests through `tower-http`'s trace layer
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run
//! RUST_LOG=info,tableside_actor=debug cargo run
//! ```
//!
//! With `RUST_LOG=info`, a checkout followed by one simulator step reads roughly:
//!
//! ```text
//! INFO Materialized entity_type="TrackedOrder" id=ORD-1700000000000-1-1 size=1
//! INFO Order placed session=session_1 order_id=ORD-1700000000000-1-1 table=4 total=31.50
//! INFO Order Confirmed order_id=ORD-1700000000000-1-1 variant=Default persistent=false
//! INFO Tick examined=1 advanced=1
//! ```
use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
