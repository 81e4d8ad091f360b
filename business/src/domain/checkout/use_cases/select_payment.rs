use async_trait::async_trait;

use crate::domain::checkout::errors::CheckoutError;
use crate::domain::checkout::model::{OrderDraft, PaymentMode};
use crate::domain::shared::value_objects::UserId;

pub struct SelectPaymentParams {
    pub user_id: UserId,
    pub mode: PaymentMode,
    pub reference: Option<String>,
}

#[async_trait]
pub trait SelectPaymentUseCase: Send + Sync {
    async fn execute(&self, params: SelectPaymentParams) -> Result<OrderDraft, CheckoutError>;
}
