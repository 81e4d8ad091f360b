use std::sync::Arc;

use async_trait::async_trait;

use super::load::{ensure_loaded, refresh};
use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartSnapshot;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::session::{CartSessions, MutationTarget};
use crate::domain::cart::use_cases::add::{AddMode, AddToCartParams, AddToCartUseCase};
use crate::domain::logger::Logger;

pub struct AddToCartUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub sessions: Arc<CartSessions>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl AddToCartUseCase for AddToCartUseCaseImpl {
    async fn execute(&self, params: AddToCartParams) -> Result<CartSnapshot, CartError> {
        self.logger.info(&format!(
            "Adding product {} x{} to cart of user {} ({:?})",
            params.product_id, params.quantity, params.user_id, params.mode
        ));

        let session = self.sessions.for_user(&params.user_id);
        let _product_lease = session.lease(MutationTarget::Product(params.product_id.clone()))?;
        ensure_loaded(&session, self.repository.as_ref()).await?;

        let existing = match params.mode {
            AddMode::Merge => session.line_for_product(&params.product_id),
            AddMode::Distinct => None,
        };

        if let Some(existing) = existing {
            let _line_lease = session.lease(MutationTarget::Line(existing.id.clone()))?;
            let quantity = existing.quantity.saturating_add(params.quantity);
            let issued_at = session.generation();

            self.repository
                .update_quantity(&existing.id, quantity)
                .await
                .map_err(CartError::from_remote)?;

            let snapshot =
                session.apply(issued_at, |store| store.set_quantity(&existing.id, quantity))?;
            self.logger.info(&format!(
                "Merged product {} into line {} (quantity {})",
                params.product_id, existing.id, quantity
            ));
            return Ok(snapshot);
        }

        self.repository
            .add(&params.user_id, &params.product_id, params.quantity)
            .await
            .map_err(CartError::from_remote)?;

        // The backend does not echo the new line id, so read the cart back.
        let snapshot = refresh(&session, self.repository.as_ref()).await?;
        self.logger.info(&format!(
            "Product {} added to cart of user {}",
            params.product_id, params.user_id
        ));
        Ok(snapshot)
    }
}
