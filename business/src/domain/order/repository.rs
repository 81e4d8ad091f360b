use async_trait::async_trait;

use super::model::{Order, OrderId};
use crate::domain::checkout::model::OrderDraft;
use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::UserId;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Submits the draft. `None` when the backend accepted it without returning an id.
    async fn place(
        &self,
        user_id: &UserId,
        draft: &OrderDraft,
    ) -> Result<Option<OrderId>, RepositoryError>;
    async fn get_all(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError>;
}
