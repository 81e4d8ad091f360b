use chrono::{DateTime, Utc};
use poem_openapi::Object;
use rust_decimal::Decimal;

use business::domain::order::model::{Order, OrderedItem, PlacedOrder};

use crate::api::checkout::dto::PaymentModeDto;

#[derive(Debug, Clone, Object)]
pub struct PlacedOrderResponse {
    /// Backend order id, `N/A` when the backend did not return one
    pub order_id: String,
    pub total_amount: Decimal,
    pub payment_mode: PaymentModeDto,
}

impl From<PlacedOrder> for PlacedOrderResponse {
    fn from(placed: PlacedOrder) -> Self {
        Self {
            order_id: placed.order_id.to_string(),
            total_amount: placed.total_amount,
            payment_mode: placed.payment_mode.into(),
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct OrderedItemResponse {
    #[oai(skip_serializing_if_is_none)]
    pub name: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub image: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub unit_price: Option<Decimal>,
    pub quantity: u32,
}

impl From<OrderedItem> for OrderedItemResponse {
    fn from(item: OrderedItem) -> Self {
        Self {
            name: item.name,
            image: item.image,
            unit_price: item.unit_price,
            quantity: item.quantity.get(),
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct OrderResponse {
    pub id: String,
    /// Backend status, lower-cased when known
    pub status: String,
    /// Tracking timeline position: 1 (pending) to 5 (delivered), 0 when cancelled
    pub progress_step: u8,
    pub items: Vec<OrderedItemResponse>,
    pub total_amount: Decimal,
    #[oai(skip_serializing_if_is_none)]
    pub payment_method: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub restaurant_name: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub customer_name: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            progress_step: order.status.progress_step(),
            status: order.status.to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
            total_amount: order.total_amount,
            payment_method: order.payment_method,
            restaurant_name: order.restaurant_name,
            customer_name: order.customer_name,
            created_at: order.created_at,
        }
    }
}
