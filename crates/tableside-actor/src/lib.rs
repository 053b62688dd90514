//! # Tableside Actor Runtime
//!
//! Resource-oriented actors on top of Tokio. Each [`ResourceActor`] owns a keyed store of
//! entities and processes requests one at a time, so entity state never needs a lock. A
//! cheap, cloneable [`ResourceClient`] talks to it over an mpsc channel and receives
//! replies on oneshot channels.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]) - domain state and its lifecycle hooks
//! 2. **Runtime** ([`ResourceActor`]) - the message loop and the store
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]) - typed requests
//!
//! ## Keys
//!
//! Actors come in two flavours:
//!
//! - [`ResourceActor::new`] takes an id source and assigns ids on `create`
//!   (a dining session gets `session_1`, `session_2`, ...).
//! - [`ResourceActor::keyed`] has no id source. Entities are keyed by the caller and are
//!   materialized on first touch through [`ActorEntity::on_missing`] (a tracked order is
//!   keyed by the order id chosen at checkout).
//!
//! ## Example
//!
//! ```rust
//! use tableside_actor::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Counter { id: u32, hits: u32 }
//! #[derive(Debug)] struct CounterCreate;
//! #[derive(Debug)] struct CounterUpdate;
//! #[derive(Debug)] enum CounterAction { Hit }
//! #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
//!
//! #[async_trait]
//! impl ActorEntity for Counter {
//!     type Id = u32; type Create = CounterCreate; type Update = CounterUpdate;
//!     type Action = CounterAction; type ActionResult = u32; type Context = (); type Error = CounterError;
//!
//!     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, hits: 0 })
//!     }
//!     async fn on_update(&mut self, _: CounterUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: CounterAction, _: &()) -> Result<u32, Self::Error> {
//!         self.hits += 1;
//!         Ok(self.hits)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut next = 0;
//!     let (actor, client) = ResourceActor::<Counter>::new(8, move || { next += 1; next });
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(CounterCreate).await.unwrap();
//!     assert_eq!(client.perform_action(id, CounterAction::Hit).await.unwrap(), 1);
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations instead of a real
//! store, which isolates an actor from the actors it depends on.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{EntityFilter, ResourceRequest, Response};
