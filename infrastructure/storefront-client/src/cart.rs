use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use business::domain::cart::model::{LineItem, LineItemId};
use business::domain::cart::quantity::Quantity;
use business::domain::cart::repository::CartRepository;
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::{ProductId, UserId};

use crate::client::{StorefrontClient, ensure_success, transport_error};

/// One entry of `GET /api/cart/{userId}`.
#[derive(Debug, Deserialize)]
pub struct CartLineDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "menuId", default)]
    pub menu: Option<MenuRefDto>,
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// `menuId` is populated with the menu document, or left as its bare id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MenuRefDto {
    Populated(MenuDto),
    Id(String),
}

#[derive(Debug, Deserialize)]
pub struct MenuDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
}

impl CartLineDto {
    pub fn into_domain(self) -> LineItem {
        let (product_id, name, image, unit_price) = match self.menu {
            Some(MenuRefDto::Populated(menu)) => {
                (ProductId::new(menu.id), menu.name, menu.image, menu.price)
            }
            Some(MenuRefDto::Id(id)) => (ProductId::new(id), None, None, None),
            // Menu item deleted on the backend; the line survives without a product.
            None => (ProductId::new(""), None, None, None),
        };

        LineItem::from_repository(
            LineItemId::new(self.id),
            product_id,
            name,
            image,
            unit_price,
            Quantity::or_one(self.quantity),
        )
    }
}

pub struct CartRepositoryHttp {
    client: StorefrontClient,
}

impl CartRepositoryHttp {
    pub fn new(client: StorefrontClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CartRepository for CartRepositoryHttp {
    async fn get_all(&self, user_id: &UserId) -> Result<Vec<LineItem>, RepositoryError> {
        let response = self
            .client
            .client
            .get(self.client.cart_url(user_id.as_str())?)
            .send()
            .await
            .map_err(transport_error)?;

        let lines: Vec<CartLineDto> = ensure_success(response)?
            .json()
            .await
            .map_err(transport_error)?;

        tracing::debug!(user_id = %user_id, lines = lines.len(), "Cart fetched");
        Ok(lines.into_iter().map(CartLineDto::into_domain).collect())
    }

    async fn add(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<(), RepositoryError> {
        let body = json!({
            "userId": user_id.as_str(),
            "menuId": product_id.as_str(),
            "quantity": quantity.get(),
        });

        let response = self
            .client
            .client
            .post(self.client.add_to_cart_url()?)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response)?;
        Ok(())
    }

    async fn update_quantity(
        &self,
        item_id: &LineItemId,
        quantity: Quantity,
    ) -> Result<(), RepositoryError> {
        let response = self
            .client
            .client
            .put(self.client.update_cart_item_url(item_id.as_str())?)
            .json(&json!({ "quantity": quantity.get() }))
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response)?;
        Ok(())
    }

    async fn delete_by_product_id(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<(), RepositoryError> {
        let response = self
            .client
            .client
            .delete(
                self.client
                    .cart_product_url(user_id.as_str(), product_id.as_str())?,
            )
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response)?;
        Ok(())
    }
}
