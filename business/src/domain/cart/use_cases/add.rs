use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartSnapshot;
use crate::domain::cart::quantity::Quantity;
use crate::domain::shared::value_objects::{ProductId, UserId};

/// How adding a product that is already in the cart behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddMode {
    /// Bump the quantity of the existing line.
    #[default]
    Merge,
    /// Always create a new line, even for a product already present.
    Distinct,
}

pub struct AddToCartParams {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub mode: AddMode,
}

#[async_trait]
pub trait AddToCartUseCase: Send + Sync {
    async fn execute(&self, params: AddToCartParams) -> Result<CartSnapshot, CartError>;
}
