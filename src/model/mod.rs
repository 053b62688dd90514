//! Plain data types. The actor-hosted ones ([`Session`], [`TrackedOrder`]) implement
//! [`ActorEntity`](tableside_actor::ActorEntity) in their actor modules.

pub mod cart;
pub mod menu;
pub mod order;
pub mod session;
pub mod status;
pub mod tracking;

pub use cart::*;
pub use menu::*;
pub use order::*;
pub use session::*;
pub use status::*;
pub use tracking::*;
