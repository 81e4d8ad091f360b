use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartSnapshot;
use crate::domain::shared::value_objects::UserId;

pub struct LoadCartParams {
    pub user_id: UserId,
}

#[async_trait]
pub trait LoadCartUseCase: Send + Sync {
    async fn execute(&self, params: LoadCartParams) -> Result<CartSnapshot, CartError>;
}
