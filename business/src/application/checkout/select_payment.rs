use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::checkout::drafts::CheckoutDrafts;
use crate::domain::checkout::errors::CheckoutError;
use crate::domain::checkout::model::{OrderDraft, PaymentSelection};
use crate::domain::checkout::use_cases::select_payment::{
    SelectPaymentParams, SelectPaymentUseCase,
};
use crate::domain::logger::Logger;

pub struct SelectPaymentUseCaseImpl {
    pub drafts: Arc<CheckoutDrafts>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl SelectPaymentUseCase for SelectPaymentUseCaseImpl {
    async fn execute(&self, params: SelectPaymentParams) -> Result<OrderDraft, CheckoutError> {
        self.logger.info(&format!(
            "Selecting payment mode {} for user {}",
            params.mode, params.user_id
        ));

        let selection = PaymentSelection {
            mode: params.mode,
            reference: params.reference.filter(|r| !r.trim().is_empty()),
        };

        self.drafts
            .update(&params.user_id, |draft| draft.with_payment(selection))
            .ok_or(CheckoutError::NoDraft)
    }
}
