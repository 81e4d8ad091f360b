use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::cart::load::refresh;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::session::CartSessions;
use crate::domain::checkout::drafts::CheckoutDrafts;
use crate::domain::checkout::errors::CheckoutError;
use crate::domain::checkout::model::OrderDraft;
use crate::domain::checkout::projector;
use crate::domain::checkout::repository::DeliveryAddressRepository;
use crate::domain::checkout::use_cases::prepare::{PrepareCheckoutParams, PrepareCheckoutUseCase};
use crate::domain::logger::Logger;

pub struct PrepareCheckoutUseCaseImpl {
    pub cart_repository: Arc<dyn CartRepository>,
    pub address_repository: Arc<dyn DeliveryAddressRepository>,
    pub sessions: Arc<CartSessions>,
    pub drafts: Arc<CheckoutDrafts>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl PrepareCheckoutUseCase for PrepareCheckoutUseCaseImpl {
    async fn execute(&self, params: PrepareCheckoutParams) -> Result<OrderDraft, CheckoutError> {
        self.logger
            .info(&format!("Preparing checkout for user: {}", params.user_id));

        let session = self.sessions.for_user(&params.user_id);
        let snapshot = refresh(&session, self.cart_repository.as_ref()).await?;
        if snapshot.items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        // Validate and build locally first; only then touch the remote profile.
        let draft = projector::project(&snapshot.items, &params.form, Utc::now())?
            .with_restaurant(params.restaurant_id);

        self.address_repository
            .save_delivery_address(&params.user_id, &draft.customer)
            .await
            .map_err(CheckoutError::Remote)?;

        self.drafts.store(params.user_id.clone(), draft.clone());
        self.logger.info(&format!(
            "Checkout prepared for user {}: {} lines, total {}",
            params.user_id,
            draft.items.len(),
            draft.total()
        ));
        Ok(draft)
    }
}
