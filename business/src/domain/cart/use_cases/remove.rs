use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::{CartSnapshot, LineItemId};
use crate::domain::shared::value_objects::UserId;

pub struct RemoveFromCartParams {
    pub user_id: UserId,
    pub item_id: LineItemId,
}

#[async_trait]
pub trait RemoveFromCartUseCase: Send + Sync {
    async fn execute(&self, params: RemoveFromCartParams) -> Result<CartSnapshot, CartError>;
}
