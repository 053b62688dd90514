use std::convert::Infallible;

use async_trait::async_trait;
use tableside_actor::{ActorEntity, FrameworkError, ResourceActor};

// --- Keyed by the actor ---

#[derive(Clone, Debug, PartialEq)]
struct Tab {
    id: u32,
    guests: u32,
    closed: bool,
}

#[derive(Debug)]
struct TabCreate {
    guests: u32,
}

#[derive(Debug)]
struct TabUpdate {
    guests: Option<u32>,
}

#[derive(Debug)]
enum TabAction {
    Close,
}

#[derive(Debug, thiserror::Error)]
enum TabError {
    #[error("a tab needs at least one guest")]
    NoGuests,
}

#[async_trait]
impl ActorEntity for Tab {
    type Id = u32;
    type Create = TabCreate;
    type Update = TabUpdate;
    type Action = TabAction;
    type ActionResult = bool;
    type Context = ();
    type Error = TabError;

    fn from_create_params(id: u32, params: TabCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            guests: params.guests,
            closed: false,
        })
    }

    async fn on_create(&mut self, _ctx: &()) -> Result<(), Self::Error> {
        if self.guests == 0 {
            return Err(TabError::NoGuests);
        }
        Ok(())
    }

    async fn on_update(&mut self, update: TabUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(guests) = update.guests {
            self.guests = guests;
        }
        if self.guests == 0 {
            return Err(TabError::NoGuests);
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: TabAction, _ctx: &()) -> Result<bool, Self::Error> {
        match action {
            TabAction::Close => {
                let changed = !self.closed;
                self.closed = true;
                Ok(changed)
            }
        }
    }
}

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let mut next = 0;
    let (actor, client) = ResourceActor::<Tab>::new(10, move || {
        next += 1;
        next
    });
    let handle = tokio::spawn(actor.run(()));

    let id = client.create(TabCreate { guests: 2 }).await.unwrap();
    assert_eq!(id, 1);

    assert!(client.perform_action(id, TabAction::Close).await.unwrap());
    assert!(!client.perform_action(id, TabAction::Close).await.unwrap());

    let updated = client
        .update(id, TabUpdate { guests: Some(5) })
        .await
        .unwrap();
    assert_eq!(updated.guests, 5);

    let snapshot = client.list().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot[&id].closed);

    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_rejected_hooks_leave_store_untouched() {
    let mut next = 0;
    let (actor, client) = ResourceActor::<Tab>::new(10, move || {
        next += 1;
        next
    });
    tokio::spawn(actor.run(()));

    let rejected = client.create(TabCreate { guests: 0 }).await;
    let err = rejected.unwrap_err().into_entity_error::<TabError>().unwrap();
    assert!(matches!(err, TabError::NoGuests));
    assert!(client.list().await.unwrap().is_empty());

    let id = client.create(TabCreate { guests: 3 }).await.unwrap();
    let failed = client.update(id, TabUpdate { guests: Some(0) }).await;
    assert!(failed.is_err());
    assert_eq!(client.get(id).await.unwrap().unwrap().guests, 3);

    let missing = client.perform_action(99, TabAction::Close).await;
    assert!(matches!(missing, Err(FrameworkError::NotFound(_))));
}

// --- Keyed by the caller ---

#[derive(Clone, Debug)]
struct Bell {
    rings: u32,
}

#[derive(Debug)]
enum BellAction {
    Ring,
    Peek,
}

#[derive(Debug, thiserror::Error)]
#[error("bell error")]
struct BellError;

#[async_trait]
impl ActorEntity for Bell {
    type Id = String;
    type Create = Infallible;
    type Update = Infallible;
    type Action = BellAction;
    type ActionResult = u32;
    type Context = ();
    type Error = BellError;

    fn from_create_params(_id: String, params: Infallible) -> Result<Self, Self::Error> {
        match params {}
    }

    fn on_missing(_id: &String, action: &BellAction, _ctx: &()) -> Option<Self> {
        match action {
            BellAction::Ring => Some(Self { rings: 0 }),
            BellAction::Peek => None,
        }
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(&mut self, action: BellAction, _ctx: &()) -> Result<u32, Self::Error> {
        if let BellAction::Ring = action {
            self.rings += 1;
        }
        Ok(self.rings)
    }
}

#[tokio::test]
async fn test_keyed_actor_materializes_on_first_touch() {
    let (actor, client) = ResourceActor::<Bell>::keyed(10);
    tokio::spawn(actor.run(()));

    let peek = client.perform_action("front".into(), BellAction::Peek).await;
    assert!(matches!(peek, Err(FrameworkError::NotFound(_))));
    assert!(client.get("front".into()).await.unwrap().is_none());

    assert_eq!(client.perform_action("front".into(), BellAction::Ring).await.unwrap(), 1);
    assert_eq!(client.perform_action("front".into(), BellAction::Ring).await.unwrap(), 2);
    assert_eq!(client.perform_action("front".into(), BellAction::Peek).await.unwrap(), 2);
}

#[tokio::test]
async fn test_list_ids_applies_filter_in_actor() {
    let (actor, client) = ResourceActor::<Bell>::keyed(10);
    tokio::spawn(actor.run(()));

    for _ in 0..3 {
        client.perform_action("front".into(), BellAction::Ring).await.unwrap();
    }
    client.perform_action("back".into(), BellAction::Ring).await.unwrap();

    let busy = client.list_ids(|bell: &Bell| bell.rings > 1).await.unwrap();
    assert_eq!(busy, vec!["front".to_string()]);

    let mut all = client.list_ids(|_| true).await.unwrap();
    all.sort();
    assert_eq!(all, vec!["back".to_string(), "front".to_string()]);
}
