//! # Mock Clients
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are answered
//! from a queue of expectations instead of an entity store. It is the tool for testing an
//! actor in isolation from the actors in its `Context`.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | State | scripted replies | real store |
//! | Error injection | `return_err` | needs a reachable failure |
//! | Use | code *around* a client | the entity itself, whole system |
//!
//! ```rust
//! use tableside_actor::mock::MockClient;
//! use tableside_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Ticket { id: u32 }
//! #[derive(Debug)] struct TicketCreate;
//! #[derive(Debug)] struct TicketUpdate;
//! #[derive(Debug)] enum TicketAction { Punch }
//! #[derive(Debug, thiserror::Error)] #[error("ticket error")] struct TicketError;
//!
//! #[async_trait]
//! impl ActorEntity for Ticket {
//!     type Id = u32; type Create = TicketCreate; type Update = TicketUpdate;
//!     type Action = TicketAction; type ActionResult = bool; type Context = (); type Error = TicketError;
//!     fn from_create_params(id: u32, _: TicketCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: TicketUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: TicketAction, _: &()) -> Result<bool, Self::Error> { Ok(true) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Ticket>::new();
//!     mock.expect_action(7).return_ok(true);
//!     mock.expect_get(8).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert!(client.perform_action(7, TicketAction::Punch).await.unwrap());
//!     assert!(matches!(client.get(8).await, Err(FrameworkError::ActorClosed)));
//!
//!     mock.verify();
//! }
//! ```
//!
//! For hand-driven tests, [`create_mock_client`] returns the raw receiver and the
//! `expect_*` helpers pull the next request off it.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: ActorEntity> {
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<HashMap<T::Id, T>, FrameworkError>,
    },
    ListIds {
        response: Result<Vec<T::Id>, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn describe(&self) -> String {
        match self {
            Expectation::Create { .. } => "Create".to_string(),
            Expectation::Get { id, .. } => format!("Get({id})"),
            Expectation::List { .. } => "List".to_string(),
            Expectation::ListIds { .. } => "ListIds".to_string(),
            Expectation::Action { id, .. } => format!("Action({id})"),
        }
    }
}

struct MockState<T: ActorEntity> {
    expectations: VecDeque<Expectation<T>>,
    failures: Vec<String>,
}

type Shared<T> = Arc<Mutex<MockState<T>>>;

/// A mock client with expectation tracking.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    state: Shared<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock client with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let state: Shared<T> = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            failures: Vec::new(),
        }));
        let shared = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = shared.lock().unwrap().expectations.pop_front();
                answer(&shared, request, expectation);
            }
        });

        Self {
            client: ResourceClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, HashMap<T::Id, T>> {
        self.builder(|response| Expectation::List { response })
    }

    /// The filter is not evaluated; the scripted ids are returned as they are.
    pub fn expect_list_ids(&mut self) -> ExpectationBuilder<T, Vec<T::Id>> {
        self.builder(|response| Expectation::ListIds { response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    fn builder<R>(
        &mut self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            state: self.state.clone(),
            make: Box::new(make),
        }
    }

    /// Panics if a request went unanswered, mismatched, or an expectation was never used.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.failures.is_empty() {
            panic!("Unexpected requests: {}", state.failures.join("; "));
        }
        if !state.expectations.is_empty() {
            let pending: Vec<String> = state.expectations.iter().map(Expectation::describe).collect();
            panic!("Not all expectations were met: {}", pending.join(", "));
        }
    }
}

/// Finishes an expectation with the reply the mock should give.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    state: Shared<T>,
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.make)(response);
        self.state.lock().unwrap().expectations.push_back(expectation);
    }
}

// Failures are recorded before the reply goes out, so a test that awaited the reply
// sees them in `verify`.
fn answer<T: ActorEntity>(
    state: &Shared<T>,
    request: ResourceRequest<T>,
    expectation: Option<Expectation<T>>,
) {
    let fail = |failure: String| state.lock().unwrap().failures.push(failure);
    match (request, expectation) {
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
            if id != want {
                fail(format!("Get({id}) arrived, expected Get({want})"));
                let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
            } else {
                let _ = respond_to.send(response);
            }
        }
        (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
            let _ = respond_to.send(response);
        }
        (ResourceRequest::ListIds { respond_to, .. }, Some(Expectation::ListIds { response })) => {
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Action { id, respond_to, .. },
            Some(Expectation::Action { id: want, response }),
        ) => {
            if id != want {
                fail(format!("Action({id}) arrived, expected Action({want})"));
                let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
            } else {
                let _ = respond_to.send(response);
            }
        }
        (request, Some(other)) => {
            fail(format!("request did not match expected {}", other.describe()));
            drop(request);
        }
        (request, None) => {
            fail("request arrived with no expectation left".to_string());
            drop(request);
        }
    }
}

// =============================================================================
// HAND-DRIVEN HELPERS
// =============================================================================

/// Creates a client and the receiver its requests land on.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next request if it is a `List`.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<oneshot::Sender<Result<HashMap<T::Id, T>, FrameworkError>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Next request if it is an `Action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
