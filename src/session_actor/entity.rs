//! [`ActorEntity`] implementation for [`Session`].

use super::actions::{SessionAction, SessionActionResult};
use super::{SessionContext, SessionCreate, SessionError, SessionUpdate};
use crate::model::{check_table_number, Session, SessionId};
use async_trait::async_trait;
use tableside_actor::ActorEntity;
use tracing::info;

#[async_trait]
impl ActorEntity for Session {
    type Id = SessionId;
    type Create = SessionCreate;
    type Update = SessionUpdate;
    type Action = SessionAction;
    type ActionResult = SessionActionResult;
    type Context = SessionContext;
    type Error = SessionError;

    fn from_create_params(id: SessionId, params: SessionCreate) -> Result<Self, Self::Error> {
        Ok(Session::new(id, params.table_number, params.theme))
    }

    /// Rejects a starting table number outside `1..=max_table_number`.
    async fn on_create(&mut self, ctx: &SessionContext) -> Result<(), Self::Error> {
        if let Some(number) = self.table_number {
            check_table_number(number, ctx.max_table_number)?;
        }
        Ok(())
    }

    async fn on_update(&mut self, update: SessionUpdate, ctx: &SessionContext) -> Result<(), Self::Error> {
        if let Some(input) = update.table_number {
            self.set_table_number(&input, ctx.max_table_number)?;
        }
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: SessionAction,
        ctx: &SessionContext,
    ) -> Result<SessionActionResult, Self::Error> {
        match action {
            SessionAction::AddToCart {
                item,
                quantity,
                special_instructions,
            } => {
                let line = self.add_to_cart(item, quantity, special_instructions)?;
                Ok(SessionActionResult::AddToCart(line))
            }
            SessionAction::UpdateQuantity { line, quantity } => {
                let item = self.update_quantity(line, quantity)?;
                Ok(SessionActionResult::UpdateQuantity(item.clone()))
            }
            SessionAction::RemoveFromCart(line) => {
                Ok(SessionActionResult::RemoveFromCart(self.remove_from_cart(line)))
            }
            SessionAction::ToggleFavorite(item_id) => {
                Ok(SessionActionResult::ToggleFavorite(self.toggle_favorite(&item_id)))
            }
            SessionAction::Totals => Ok(SessionActionResult::Totals(self.totals(&ctx.rates))),
            SessionAction::Checkout {
                special_instructions,
            } => {
                let placed_at = ctx.clock.now();
                let order = self.prepare_order(
                    special_instructions,
                    placed_at,
                    &ctx.rates,
                    &ctx.estimated_time,
                )?;

                // The cart is only cleared once the order is registered for tracking.
                ctx.tracking.subscribe_to_order(order.id.clone()).await?;
                self.commit_order(order.clone());

                info!(
                    session = %self.id,
                    order_id = %order.id,
                    table = order.table_number,
                    total = %order.total,
                    "Order placed"
                );
                Ok(SessionActionResult::Checkout(order))
            }
        }
    }
}
