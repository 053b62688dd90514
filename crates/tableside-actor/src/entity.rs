//! # ActorEntity Trait
//!
//! The contract an entity implements to be hosted by a [`ResourceActor`](crate::ResourceActor).
//! Associated types pin down the id, the DTOs, the actions and the error, so a session
//! request can never reach the tracking actor. Hooks with default bodies
//! ([`on_create`](ActorEntity::on_create), [`on_delete`](ActorEntity::on_delete),
//! [`on_missing`](ActorEntity::on_missing)) only need overriding when an entity cares.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any entity must implement to be managed by a `ResourceActor`.
///
/// # Context
/// `Context` is handed to every hook. It carries the entity's dependencies (other clients,
/// a clock, a notification sink) and is supplied when the actor is started with
/// [`ResourceActor::run`](crate::ResourceActor::run), not when it is constructed.
///
/// # Uninhabited DTOs
/// An entity that is never created or updated through the generic requests can use
/// [`std::convert::Infallible`] for `Create` or `Update` and match on the empty value.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Entity-specific operations.
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every hook. Use `()` if none are needed.
    type Context: Send + Sync;

    /// One error enum for the whole entity, not one per action.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the entity from its assigned id and the create payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Materialize an entity for an action aimed at an id the store does not hold.
    ///
    /// Returning `None` makes the action fail with
    /// [`FrameworkError::NotFound`](crate::FrameworkError::NotFound).
    fn on_missing(_id: &Self::Id, _action: &Self::Action, _ctx: &Self::Context) -> Option<Self> {
        None
    }

    /// Called after construction and before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update payload.
    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the entity is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle an entity-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
