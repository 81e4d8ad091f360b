use std::sync::Arc;

use async_trait::async_trait;

use super::load::ensure_loaded;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartSnapshot;
use crate::domain::cart::quantity::{DecrementPolicy, QuantityChange};
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::session::{CartSessions, MutationTarget};
use crate::domain::cart::use_cases::change_quantity::{
    ChangeQuantityParams, ChangeQuantityUseCase,
};
use crate::domain::logger::Logger;

pub struct ChangeQuantityUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub sessions: Arc<CartSessions>,
    pub policy: DecrementPolicy,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ChangeQuantityUseCase for ChangeQuantityUseCaseImpl {
    async fn execute(&self, params: ChangeQuantityParams) -> Result<CartSnapshot, CartError> {
        self.logger.info(&format!(
            "Applying {} to line {} of user {}",
            params.change, params.item_id, params.user_id
        ));

        let session = self.sessions.for_user(&params.user_id);
        let _lease = session.lease(MutationTarget::Line(params.item_id.clone()))?;
        ensure_loaded(&session, self.repository.as_ref()).await?;

        let issued_at = session.generation();
        match session.quantity_after(&params.item_id, params.change) {
            Ok(quantity) => {
                self.repository
                    .update_quantity(&params.item_id, quantity)
                    .await
                    .map_err(CartError::from_remote)?;
                session.apply(issued_at, |store| store.set_quantity(&params.item_id, quantity))
            }
            Err(CartError::QuantityBelowMinimum)
                if params.change == QuantityChange::Decrement
                    && self.policy == DecrementPolicy::RemoveAtFloor =>
            {
                let line = session.line(&params.item_id).ok_or(CartError::NotFound)?;
                let _product_lease =
                    session.lease(MutationTarget::Product(line.product_id.clone()))?;

                self.repository
                    .delete_by_product_id(&params.user_id, &line.product_id)
                    .await
                    .map_err(CartError::from_remote)?;

                self.logger.info(&format!(
                    "Line {} removed at quantity floor",
                    params.item_id
                ));
                session.apply(issued_at, |store| {
                    store.remove_product(&line.product_id);
                    Ok(())
                })
            }
            Err(err) => {
                self.logger.debug(&format!(
                    "Rejected {} on line {}: {}",
                    params.change, params.item_id, err
                ));
                Err(err)
            }
        }
    }
}
