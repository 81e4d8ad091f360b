use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::errors::CheckoutError;
use super::model::{CheckoutField, Customer, CustomerForm, OrderDraft, OrderLine};
use crate::domain::cart::model::LineItem;

/// Projects the current cart lines and the delivery form into an order draft.
///
/// Pure: the cart is only read. Required fields are checked in form order and
/// the first empty one is reported.
pub fn project(
    items: &[LineItem],
    form: &CustomerForm,
    drafted_at: DateTime<Utc>,
) -> Result<OrderDraft, CheckoutError> {
    let customer = Customer {
        name: required(&form.name, CheckoutField::Name)?,
        line1: required(&form.line1, CheckoutField::Line1)?,
        line2: Some(form.line2.trim().to_string()).filter(|line| !line.is_empty()),
        city: required(&form.city, CheckoutField::City)?,
        pincode: required(&form.pincode, CheckoutField::Pincode)?,
    };

    let items = items
        .iter()
        .map(|item| OrderLine {
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price.unwrap_or(Decimal::ZERO),
            quantity: item.quantity,
        })
        .collect();

    Ok(OrderDraft {
        customer,
        items,
        restaurant_id: None,
        payment: None,
        drafted_at,
    })
}

fn required(value: &str, field: CheckoutField) -> Result<String, CheckoutError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CheckoutError::Validation(field));
    }
    Ok(trimmed.to_string())
}
