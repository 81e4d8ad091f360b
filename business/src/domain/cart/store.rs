use rust_decimal::Decimal;

use super::count::item_count;
use super::errors::CartError;
use super::model::{CartSnapshot, LineItem, LineItemId};
use super::quantity::{Quantity, QuantityChange};
use super::totals;
use crate::domain::shared::value_objects::ProductId;

/// The set of cart lines for one user, in the order the backend returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartStore {
    items: Vec<LineItem>,
}

impl CartStore {
    pub fn from_items(items: Vec<LineItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn line(&self, id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn line_for_product(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|item| &item.product_id == product_id)
    }

    /// Quantity the line would have after `change`, without applying it.
    pub fn quantity_after(
        &self,
        id: &LineItemId,
        change: QuantityChange,
    ) -> Result<Quantity, CartError> {
        let line = self.line(id).ok_or(CartError::NotFound)?;
        change.apply(line.quantity)
    }

    pub fn set_quantity(&mut self, id: &LineItemId, quantity: Quantity) -> Result<(), CartError> {
        let line = self
            .items
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or(CartError::NotFound)?;
        line.quantity = quantity;
        Ok(())
    }

    /// Removes every line referring to `product_id`, returning how many were dropped.
    pub fn remove_product(&mut self, product_id: &ProductId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| &item.product_id != product_id);
        before - self.items.len()
    }

    pub fn total(&self) -> Decimal {
        totals::total(&self.items)
    }

    pub fn count(&self) -> u64 {
        item_count(&self.items)
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            total: self.total(),
            count: self.count(),
        }
    }
}
