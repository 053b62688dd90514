//! # Generic Messages
//!
//! Requests carried from a [`ResourceClient`](crate::ResourceClient) to its
//! [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Predicate over stored entities, evaluated inside the actor.
pub struct EntityFilter<T>(Box<dyn Fn(&T) -> bool + Send>);

impl<T> EntityFilter<T> {
    pub fn new(filter: impl Fn(&T) -> bool + Send + 'static) -> Self {
        Self(Box::new(filter))
    }

    pub fn matches(&self, entity: &T) -> bool {
        (self.0)(entity)
    }
}

impl<T> fmt::Debug for EntityFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EntityFilter")
    }
}

/// A request to an actor.
///
/// The variants are the resource lifecycle (create, read, update, delete), a keyed
/// snapshot of the whole store (`List`), the ids of matching entities (`ListIds`), and
/// `Action` for entity-specific operations.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<HashMap<T::Id, T>>,
    },
    ListIds {
        filter: EntityFilter<T>,
        respond_to: Response<Vec<T::Id>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
