use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::{ProductId, UserId};

use super::model::{LineItem, LineItemId};
use super::quantity::Quantity;

/// Port to the remote cart owned by the storefront backend.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Lines in the order the backend returns them.
    async fn get_all(&self, user_id: &UserId) -> Result<Vec<LineItem>, RepositoryError>;
    async fn add(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<(), RepositoryError>;
    async fn update_quantity(
        &self,
        item_id: &LineItemId,
        quantity: Quantity,
    ) -> Result<(), RepositoryError>;
    /// The backend removes cart entries by product, not by line id.
    async fn delete_by_product_id(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<(), RepositoryError>;
}
