use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::quantity::Quantity;
use super::totals;
use crate::domain::shared::value_objects::ProductId;

/// Identifier of a cart entry, distinct from the product it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(String);

impl LineItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LineItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LineItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One product-plus-quantity entry in a user's cart.
///
/// `unit_price` is the price snapshot the backend returned with the line. It is
/// absent when the menu item behind the line no longer exists, and such lines
/// price at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub id: LineItemId,
    pub product_id: ProductId,
    pub name: Option<String>,
    pub image: Option<String>,
    pub unit_price: Option<Decimal>,
    pub quantity: Quantity,
}

impl LineItem {
    /// Constructor for data returned by the remote cart (no validation).
    pub fn from_repository(
        id: LineItemId,
        product_id: ProductId,
        name: Option<String>,
        image: Option<String>,
        unit_price: Option<Decimal>,
        quantity: Quantity,
    ) -> Self {
        Self {
            id,
            product_id,
            name,
            image,
            unit_price,
            quantity,
        }
    }

    pub fn subtotal(&self) -> Decimal {
        totals::line_subtotal(self)
    }
}

/// Read-only view of the cart handed to callers after every load or mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,
    pub total: Decimal,
    pub count: u64,
}
