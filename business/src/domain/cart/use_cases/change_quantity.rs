use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::{CartSnapshot, LineItemId};
use crate::domain::cart::quantity::QuantityChange;
use crate::domain::shared::value_objects::UserId;

pub struct ChangeQuantityParams {
    pub user_id: UserId,
    pub item_id: LineItemId,
    pub change: QuantityChange,
}

#[async_trait]
pub trait ChangeQuantityUseCase: Send + Sync {
    async fn execute(&self, params: ChangeQuantityParams) -> Result<CartSnapshot, CartError>;
}
