use async_trait::async_trait;

use super::model::Customer;
use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::UserId;

/// Port to the user's saved delivery address on the backend profile.
///
/// Saving is a full overwrite, so repeating it with the same address is harmless.
#[async_trait]
pub trait DeliveryAddressRepository: Send + Sync {
    async fn save_delivery_address(
        &self,
        user_id: &UserId,
        customer: &Customer,
    ) -> Result<(), RepositoryError>;
}
