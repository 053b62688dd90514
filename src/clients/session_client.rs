use crate::model::{CartItem, CartLineId, MenuItem, Order, Session, SessionId, Theme, Totals};
use crate::session_actor::{SessionAction, SessionActionResult, SessionCreate, SessionError, SessionUpdate};
use async_trait::async_trait;
use tableside_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for the session actor: everything a table's guest can do.
#[derive(Clone)]
pub struct SessionClient {
    inner: ResourceClient<Session>,
}

#[async_trait]
impl ActorClient<Session> for SessionClient {
    type Error = SessionError;

    fn inner(&self) -> &ResourceClient<Session> {
        &self.inner
    }

    /// Entity errors come back as the `SessionError` they started as.
    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<SessionError>() {
            Ok(domain) => domain,
            Err(FrameworkError::NotFound(id)) => SessionError::NotFound(id),
            Err(other) => SessionError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl SessionClient {
    pub fn new(inner: ResourceClient<Session>) -> Self {
        Self { inner }
    }

    async fn act(&self, session: SessionId, action: SessionAction) -> Result<SessionActionResult, SessionError> {
        self.inner
            .perform_action(session, action)
            .await
            .map_err(Self::map_error)
    }

    /// The whole session, or `NotFound`.
    pub async fn session(&self, session: SessionId) -> Result<Session, SessionError> {
        self.get(session)
            .await?
            .ok_or_else(|| SessionError::NotFound(session.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn open_session(&self, table_number: Option<u32>, theme: Theme) -> Result<SessionId, SessionError> {
        debug!("Sending request");
        self.inner
            .create(SessionCreate { table_number, theme })
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn end_session(&self, session: SessionId) -> Result<(), SessionError> {
        self.delete(session).await
    }

    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn add_to_cart(
        &self,
        session: SessionId,
        item: MenuItem,
        quantity: u32,
        special_instructions: Option<String>,
    ) -> Result<CartLineId, SessionError> {
        debug!("Sending request");
        let action = SessionAction::AddToCart {
            item,
            quantity,
            special_instructions,
        };
        match self.act(session, action).await? {
            SessionActionResult::AddToCart(line) => Ok(line),
            _ => Err(SessionError::UnexpectedReply("AddToCart")),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        session: SessionId,
        line: CartLineId,
        quantity: i64,
    ) -> Result<CartItem, SessionError> {
        debug!("Sending request");
        match self.act(session, SessionAction::UpdateQuantity { line, quantity }).await? {
            SessionActionResult::UpdateQuantity(item) => Ok(item),
            _ => Err(SessionError::UnexpectedReply("UpdateQuantity")),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, session: SessionId, line: CartLineId) -> Result<bool, SessionError> {
        debug!("Sending request");
        match self.act(session, SessionAction::RemoveFromCart(line)).await? {
            SessionActionResult::RemoveFromCart(removed) => Ok(removed),
            _ => Err(SessionError::UnexpectedReply("RemoveFromCart")),
        }
    }

    /// Validate and store a table number typed by the guest.
    #[instrument(skip(self))]
    pub async fn set_table_number(&self, session: SessionId, input: &str) -> Result<u32, SessionError> {
        debug!("Sending request");
        let update = SessionUpdate {
            table_number: Some(input.to_string()),
            ..SessionUpdate::default()
        };
        let updated = self.inner.update(session, update).await.map_err(Self::map_error)?;
        updated.table_number.ok_or(SessionError::TableNotSet)
    }

    pub async fn table_number(&self, session: SessionId) -> Result<Option<u32>, SessionError> {
        Ok(self.session(session).await?.table_number)
    }

    #[instrument(skip(self))]
    pub async fn set_theme(&self, session: SessionId, theme: Theme) -> Result<Theme, SessionError> {
        debug!("Sending request");
        let update = SessionUpdate {
            theme: Some(theme),
            ..SessionUpdate::default()
        };
        let updated = self.inner.update(session, update).await.map_err(Self::map_error)?;
        Ok(updated.theme)
    }

    pub async fn theme(&self, session: SessionId) -> Result<Theme, SessionError> {
        Ok(self.session(session).await?.theme)
    }

    /// Returns the new favorite flag.
    #[instrument(skip(self))]
    pub async fn toggle_favorite(&self, session: SessionId, item_id: &str) -> Result<bool, SessionError> {
        debug!("Sending request");
        match self
            .act(session, SessionAction::ToggleFavorite(item_id.to_string()))
            .await?
        {
            SessionActionResult::ToggleFavorite(favorite) => Ok(favorite),
            _ => Err(SessionError::UnexpectedReply("ToggleFavorite")),
        }
    }

    pub async fn is_favorite(&self, session: SessionId, item_id: &str) -> Result<bool, SessionError> {
        Ok(self.session(session).await?.is_favorite(item_id))
    }

    pub async fn totals(&self, session: SessionId) -> Result<Totals, SessionError> {
        match self.act(session, SessionAction::Totals).await? {
            SessionActionResult::Totals(totals) => Ok(totals),
            _ => Err(SessionError::UnexpectedReply("Totals")),
        }
    }

    /// Place the order for the current cart and start tracking it.
    #[instrument(skip(self))]
    pub async fn checkout(
        &self,
        session: SessionId,
        special_instructions: Option<String>,
    ) -> Result<Order, SessionError> {
        debug!("Sending request");
        match self
            .act(session, SessionAction::Checkout { special_instructions })
            .await?
        {
            SessionActionResult::Checkout(order) => Ok(order),
            _ => Err(SessionError::UnexpectedReply("Checkout")),
        }
    }
}
