use rust_decimal::Decimal;

use super::model::LineItem;

/// Per-line subtotal: `unit_price * quantity`, with a missing price counted as zero.
///
/// Saturates at `Decimal::MAX` instead of overflowing.
pub fn line_subtotal(item: &LineItem) -> Decimal {
    item.unit_price
        .unwrap_or(Decimal::ZERO)
        .saturating_mul(Decimal::from(item.quantity.get()))
}

/// Grand total over the given lines. Recomputed on every call, never cached.
pub fn total<'a>(items: impl IntoIterator<Item = &'a LineItem>) -> Decimal {
    items
        .into_iter()
        .map(line_subtotal)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}
