use chrono::{DateTime, Utc};
use poem_openapi::Object;
use rust_decimal::Decimal;

use business::domain::order::notifier::OrderPlaced;

#[derive(Debug, Clone, Object)]
pub struct OrderPlacedResponse {
    pub order_id: String,
    pub customer_name: String,
    pub total_amount: Decimal,
    pub placed_at: DateTime<Utc>,
}

impl From<OrderPlaced> for OrderPlacedResponse {
    fn from(event: OrderPlaced) -> Self {
        Self {
            order_id: event.order_id.to_string(),
            customer_name: event.customer_name,
            total_amount: event.total_amount,
            placed_at: event.placed_at,
        }
    }
}
