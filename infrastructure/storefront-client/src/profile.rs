use async_trait::async_trait;
use serde_json::{Value, json};

use business::domain::checkout::model::Customer;
use business::domain::checkout::repository::DeliveryAddressRepository;
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::UserId;

use crate::client::{StorefrontClient, ensure_success, transport_error};

/// Profile update body carrying only the delivery address.
pub fn delivery_address_body(customer: &Customer) -> Value {
    json!({
        "deliveryAddress": {
            "line1": customer.line1,
            "line2": customer.line2.as_deref().unwrap_or_default(),
            "city": customer.city,
            "pincode": customer.pincode,
        }
    })
}

pub struct DeliveryAddressRepositoryHttp {
    client: StorefrontClient,
}

impl DeliveryAddressRepositoryHttp {
    pub fn new(client: StorefrontClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DeliveryAddressRepository for DeliveryAddressRepositoryHttp {
    async fn save_delivery_address(
        &self,
        user_id: &UserId,
        customer: &Customer,
    ) -> Result<(), RepositoryError> {
        let response = self
            .client
            .client
            .put(self.client.profile_url(user_id.as_str())?)
            .json(&delivery_address_body(customer))
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response)?;
        tracing::debug!(user_id = %user_id, "Delivery address saved");
        Ok(())
    }
}
