use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::model::OrderId;

/// Outbound event emitted once the backend confirmed a placed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderPlaced {
    pub order_id: OrderId,
    pub customer_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub placed_at: DateTime<Utc>,
}

/// Port to whatever tells operators about new orders.
///
/// Delivery is best effort: the order is already placed when this runs, so
/// implementations log failures instead of returning them.
pub trait OrderNotifier: Send + Sync {
    fn order_placed(&self, event: OrderPlaced);
}
