use async_trait::async_trait;

use crate::domain::checkout::errors::CheckoutError;
use crate::domain::checkout::model::{CustomerForm, OrderDraft};
use crate::domain::shared::value_objects::UserId;

pub struct PrepareCheckoutParams {
    pub user_id: UserId,
    pub form: CustomerForm,
    pub restaurant_id: Option<String>,
}

#[async_trait]
pub trait PrepareCheckoutUseCase: Send + Sync {
    async fn execute(&self, params: PrepareCheckoutParams) -> Result<OrderDraft, CheckoutError>;
}
