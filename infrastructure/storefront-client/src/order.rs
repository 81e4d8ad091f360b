use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use business::domain::cart::quantity::Quantity;
use business::domain::checkout::model::OrderDraft;
use business::domain::errors::RepositoryError;
use business::domain::order::model::{Order, OrderId, OrderStatus, OrderedItem};
use business::domain::order::repository::OrderRepository;
use business::domain::shared::value_objects::UserId;

use crate::client::{StorefrontClient, ensure_success, transport_error};

/// Body of `POST /api/order/place`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest<'a> {
    pub user_id: &'a str,
    pub restaurant_id: Option<&'a str>,
    pub address: AddressBody<'a>,
    pub items: Vec<OrderItemBody<'a>>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub payment_method: &'a str,
}

#[derive(Debug, Serialize)]
pub struct AddressBody<'a> {
    pub name: &'a str,
    pub line1: &'a str,
    pub line2: &'a str,
    pub city: &'a str,
    pub pincode: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemBody<'a> {
    pub menu_id: &'a str,
    pub name: Option<&'a str>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

impl<'a> PlaceOrderRequest<'a> {
    /// `None` when the draft has no payment step yet.
    pub fn from_draft(user_id: &'a UserId, draft: &'a OrderDraft) -> Option<Self> {
        let payment = draft.payment.as_ref()?;
        let customer = &draft.customer;

        Some(Self {
            user_id: user_id.as_str(),
            restaurant_id: draft.restaurant_id.as_deref(),
            address: AddressBody {
                name: &customer.name,
                line1: &customer.line1,
                line2: customer.line2.as_deref().unwrap_or_default(),
                city: &customer.city,
                pincode: &customer.pincode,
            },
            items: draft
                .items
                .iter()
                .map(|line| OrderItemBody {
                    menu_id: line.product_id.as_str(),
                    name: line.name.as_deref(),
                    price: line.unit_price,
                    quantity: line.quantity.get(),
                })
                .collect(),
            total_amount: draft.total(),
            payment_method: payment.mode.wire_label(),
        })
    }
}

/// One entry of `GET /api/order/myorders`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<OrderItemDto>>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub restaurant_name: Option<String>,
    #[serde(default)]
    pub address: Option<OrderAddressDto>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct OrderItemDto {
    pub name: Option<String>,
    pub image: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct OrderAddressDto {
    pub name: Option<String>,
}

impl OrderDto {
    pub fn into_domain(self) -> Order {
        Order {
            id: OrderId::new(self.id),
            status: self
                .status
                .as_deref()
                .map(OrderStatus::from)
                .unwrap_or(OrderStatus::Pending),
            items: self
                .items
                .unwrap_or_default()
                .into_iter()
                .map(|item| OrderedItem {
                    name: item.name,
                    image: item.image,
                    unit_price: item.price,
                    quantity: Quantity::or_one(item.quantity),
                })
                .collect(),
            total_amount: self.total_amount.unwrap_or(Decimal::ZERO),
            payment_method: self.payment_method,
            restaurant_name: self.restaurant_name,
            customer_name: self.address.and_then(|address| address.name),
            created_at: self.created_at,
        }
    }
}

/// Reads the order history body; anything but an array counts as no orders.
pub fn parse_orders(body: serde_json::Value) -> Result<Vec<Order>, RepositoryError> {
    if !body.is_array() {
        return Ok(Vec::new());
    }
    let orders: Vec<OrderDto> =
        serde_json::from_value(body).map_err(|_| RepositoryError::decode())?;
    Ok(orders.into_iter().map(OrderDto::into_domain).collect())
}

/// Extracts `orderId` from the placement response, if any.
pub fn parse_order_id(body: &serde_json::Value) -> Option<OrderId> {
    match body.get("orderId")? {
        serde_json::Value::String(id) if !id.is_empty() => Some(OrderId::new(id.clone())),
        serde_json::Value::Number(id) => Some(OrderId::new(id.to_string())),
        _ => None,
    }
}

pub struct OrderRepositoryHttp {
    client: StorefrontClient,
}

impl OrderRepositoryHttp {
    pub fn new(client: StorefrontClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrderRepository for OrderRepositoryHttp {
    async fn place(
        &self,
        user_id: &UserId,
        draft: &OrderDraft,
    ) -> Result<Option<OrderId>, RepositoryError> {
        let body = PlaceOrderRequest::from_draft(user_id, draft).ok_or(RepositoryError::decode())?;

        let response = self
            .client
            .client
            .post(self.client.place_order_url()?)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        // The order exists once the backend said yes; an unreadable body only loses the id.
        let data: serde_json::Value = ensure_success(response)?
            .json()
            .await
            .unwrap_or(serde_json::Value::Null);

        Ok(parse_order_id(&data))
    }

    async fn get_all(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        let response = self
            .client
            .client
            .get(self.client.my_orders_url()?)
            .query(&[("userId", user_id.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        let data: serde_json::Value = ensure_success(response)?
            .json()
            .await
            .map_err(transport_error)?;

        let orders = parse_orders(data)?;
        tracing::debug!(user_id = %user_id, orders = orders.len(), "Order history fetched");
        Ok(orders)
    }
}
