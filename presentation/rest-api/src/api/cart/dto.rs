use poem_openapi::{Enum, Object};
use rust_decimal::Decimal;

use business::domain::cart::count::CartCount;
use business::domain::cart::model::{CartSnapshot, LineItem};
use business::domain::cart::use_cases::add::AddMode;

#[derive(Debug, Clone, Copy, Enum)]
pub enum AddModeDto {
    /// Bump the quantity of the line already holding the product
    #[oai(rename = "merge")]
    Merge,
    /// Always create a new line
    #[oai(rename = "distinct")]
    Distinct,
}

impl From<AddModeDto> for AddMode {
    fn from(dto: AddModeDto) -> Self {
        match dto {
            AddModeDto::Merge => AddMode::Merge,
            AddModeDto::Distinct => AddMode::Distinct,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct AddToCartRequest {
    /// Menu item to add
    pub product_id: String,
    /// Units to add (default 1)
    #[oai(skip_serializing_if_is_none)]
    pub quantity: Option<u32>,
    /// Behaviour when the product is already in the cart (default merge)
    #[oai(skip_serializing_if_is_none)]
    pub mode: Option<AddModeDto>,
}

#[derive(Debug, Clone, Object)]
pub struct LineItemResponse {
    /// Cart line identifier
    pub id: String,
    /// Menu item behind the line; absent when it no longer exists
    #[oai(skip_serializing_if_is_none)]
    pub product_id: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub name: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub image: Option<String>,
    /// Unit price snapshot, in rupees
    #[oai(skip_serializing_if_is_none)]
    pub unit_price: Option<Decimal>,
    pub quantity: u32,
    /// unit_price x quantity, zero when the price is unknown
    pub subtotal: Decimal,
}

impl From<LineItem> for LineItemResponse {
    fn from(item: LineItem) -> Self {
        let subtotal = item.subtotal();
        Self {
            id: item.id.to_string(),
            product_id: (!item.product_id.is_unknown()).then(|| item.product_id.to_string()),
            name: item.name,
            image: item.image,
            unit_price: item.unit_price,
            quantity: item.quantity.get(),
            subtotal,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct CartResponse {
    /// Lines in backend order
    pub items: Vec<LineItemResponse>,
    /// Grand total, in rupees
    pub total: Decimal,
    /// Sum of quantities
    pub count: u64,
}

impl From<CartSnapshot> for CartResponse {
    fn from(snapshot: CartSnapshot) -> Self {
        Self {
            items: snapshot.items.into_iter().map(Into::into).collect(),
            total: snapshot.total,
            count: snapshot.count,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct CartCountResponse {
    /// Sum of quantities in the cart
    pub count: u64,
    /// Increases with every publication; later values supersede earlier ones
    pub sequence: u64,
}

impl From<CartCount> for CartCountResponse {
    fn from(count: CartCount) -> Self {
        Self {
            count: count.count,
            sequence: count.sequence,
        }
    }
}
