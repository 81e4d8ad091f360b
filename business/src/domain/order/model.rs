use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::cart::quantity::Quantity;
use crate::domain::checkout::model::PaymentMode;

const UNASSIGNED_ORDER_ID: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Placeholder for an order the backend accepted without returning an id.
    pub fn unassigned() -> Self {
        Self(UNASSIGNED_ORDER_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fulfilment status reported by the order backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
    /// Any status this storefront does not know about, kept verbatim.
    Other(String),
}

impl OrderStatus {
    /// Position on the tracking timeline: 1 (pending) to 5 (delivered), 0 when cancelled.
    /// Unknown statuses sit on the first step.
    pub fn progress_step(&self) -> u8 {
        match self {
            OrderStatus::Pending => 1,
            OrderStatus::Confirmed => 2,
            OrderStatus::Preparing => 3,
            OrderStatus::OutForDelivery => 4,
            OrderStatus::Delivered => 5,
            OrderStatus::Cancelled => 0,
            OrderStatus::Other(_) => 1,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Confirmed => write!(f, "confirmed"),
            OrderStatus::Preparing => write!(f, "preparing"),
            OrderStatus::OutForDelivery => write!(f, "out for delivery"),
            OrderStatus::Delivered => write!(f, "delivered"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
            OrderStatus::Other(raw) => write!(f, "{}", raw),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "pending" => OrderStatus::Pending,
            "confirmed" => OrderStatus::Confirmed,
            "preparing" => OrderStatus::Preparing,
            "out for delivery" => OrderStatus::OutForDelivery,
            "delivered" => OrderStatus::Delivered,
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(raw.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderedItem {
    pub name: Option<String>,
    pub image: Option<String>,
    pub unit_price: Option<Decimal>,
    pub quantity: Quantity,
}

/// A past order as listed in the user's history.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub items: Vec<OrderedItem>,
    pub total_amount: Decimal,
    pub payment_method: Option<String>,
    pub restaurant_name: Option<String>,
    pub customer_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Confirmation handed back after a successful placement.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub total_amount: Decimal,
    pub payment_mode: PaymentMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_statuses_to_progress_steps() {
        assert_eq!(OrderStatus::from("pending").progress_step(), 1);
        assert_eq!(OrderStatus::from("Confirmed").progress_step(), 2);
        assert_eq!(OrderStatus::from("PREPARING").progress_step(), 3);
        assert_eq!(OrderStatus::from("Out for Delivery").progress_step(), 4);
        assert_eq!(OrderStatus::from("delivered").progress_step(), 5);
        assert_eq!(OrderStatus::from("cancelled").progress_step(), 0);
    }

    #[test]
    fn should_keep_unknown_status_on_first_step() {
        let status = OrderStatus::from("on hold");

        assert_eq!(status, OrderStatus::Other("on hold".to_string()));
        assert_eq!(status.progress_step(), 1);
        assert_eq!(status.to_string(), "on hold");
    }

    #[test]
    fn should_use_placeholder_for_unassigned_order_id() {
        assert_eq!(OrderId::unassigned().as_str(), "N/A");
    }
}
