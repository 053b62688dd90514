//! # Generic Actor Server
//!
//! [`ResourceActor`] owns the entity store and the receiving end of the request channel.
//! Requests are handled strictly one after another, so a hook that mutates an entity and
//! then reports the change (for example, a status transition followed by its
//! notification) is never interleaved with another request.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

type IdSource<Id> = Box<dyn FnMut() -> Id + Send>;

/// The generic actor that manages a collection of entities.
///
/// # Usage Pattern
///
/// 1. **Create**: [`ResourceActor::new`] (actor assigns ids) or [`ResourceActor::keyed`]
///    (caller supplies ids) returns the actor and its client.
/// 2. **Wire**: pass the entity's dependencies into [`ResourceActor::run`].
/// 3. **Run**: spawn the returned future. It ends once every client clone is dropped.
///
/// # Operations
///
/// * **Create**: draw an id from the id source, build the entity, run `on_create`, store it.
/// * **Get**: clone the entity out of the store, if present.
/// * **List**: clone the whole store. Callers iterate the snapshot, never the live map.
/// * **ListIds**: clone only the ids of entities that pass the filter.
/// * **Update**: run `on_update` on the stored entity and return the new state.
/// * **Delete**: run `on_delete`, then remove the entity.
/// * **Action**: materialize the entity through `on_missing` when absent, then run
///   `handle_action`.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    id_source: Option<IdSource<T::Id>>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates an actor that assigns ids from `id_source` on every `create`.
    ///
    /// `buffer_size` is the capacity of the request channel. Clients wait for space when
    /// it is full.
    pub fn new(
        buffer_size: usize,
        id_source: impl FnMut() -> T::Id + Send + 'static,
    ) -> (Self, ResourceClient<T>) {
        Self::build(buffer_size, Some(Box::new(id_source)))
    }

    /// Creates an actor whose entities are keyed by the caller.
    ///
    /// `create` requests fail with [`FrameworkError::NoIdSource`]; entities come into
    /// existence through [`ActorEntity::on_missing`].
    pub fn keyed(buffer_size: usize) -> (Self, ResourceClient<T>) {
        Self::build(buffer_size, None)
    }

    fn build(buffer_size: usize, id_source: Option<IdSource<T::Id>>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            id_source,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the message loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let Some(next_id) = self.id_source.as_mut() else {
                        warn!(entity_type, "Create rejected, actor is keyed by caller");
                        let _ = respond_to.send(Err(FrameworkError::NoIdSource));
                        continue;
                    };
                    let id = next_id();

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, %id, error = %e, "on_create failed");
                                let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.clone()));
                }
                ResourceRequest::ListIds { filter, respond_to } => {
                    let ids: Vec<T::Id> = self
                        .store
                        .iter()
                        .filter(|(_, item)| filter.matches(item))
                        .map(|(id, _)| id.clone())
                        .collect();
                    debug!(entity_type, size = self.store.len(), matched = ids.len(), "ListIds");
                    let _ = respond_to.send(Ok(ids));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    // Work on a copy so a rejected update leaves the stored entity untouched.
                    let mut draft = item.clone();
                    match draft.on_update(update, &context).await {
                        Ok(()) => {
                            *item = draft.clone();
                            info!(entity_type, %id, "Updated");
                            let _ = respond_to.send(Ok(draft));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if !self.store.contains_key(&id) {
                        if let Some(fresh) = T::on_missing(&id, &action, &context) {
                            self.store.insert(id.clone(), fresh);
                            info!(entity_type, %id, size = self.store.len(), "Materialized");
                        }
                    }
                    let Some(item) = self.store.get_mut(&id) else {
                        debug!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = item
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    match &result {
                        Ok(_) => debug!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
