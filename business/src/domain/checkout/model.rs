use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::cart::quantity::Quantity;
use crate::domain::shared::value_objects::ProductId;

/// Delivery form as typed by the user on the checkout view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub name: String,
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub pincode: String,
}

/// Required delivery fields, in the order they are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutField {
    Name,
    Line1,
    City,
    Pincode,
}

impl std::fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutField::Name => write!(f, "name"),
            CheckoutField::Line1 => write!(f, "line1"),
            CheckoutField::City => write!(f, "city"),
            CheckoutField::Pincode => write!(f, "pincode"),
        }
    }
}

/// Validated delivery details carried by an order draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub pincode: String,
}

/// Immutable copy of a cart line taken at checkout time.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: Option<String>,
    pub unit_price: Decimal,
    pub quantity: Quantity,
}

impl OrderLine {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price
            .saturating_mul(Decimal::from(self.quantity.get()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMode {
    CashOnDelivery,
    PayPal,
    Upi,
}

impl PaymentMode {
    /// Label the order backend stores as `paymentMethod`.
    pub fn wire_label(&self) -> &'static str {
        match self {
            PaymentMode::CashOnDelivery => "Cash on Delivery",
            PaymentMode::PayPal => "PayPal",
            PaymentMode::Upi => "UPI",
        }
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMode::CashOnDelivery => write!(f, "cash_on_delivery"),
            PaymentMode::PayPal => write!(f, "paypal"),
            PaymentMode::Upi => write!(f, "upi"),
        }
    }
}

impl std::str::FromStr for PaymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash_on_delivery" | "cod" => Ok(PaymentMode::CashOnDelivery),
            "paypal" => Ok(PaymentMode::PayPal),
            "upi" => Ok(PaymentMode::Upi),
            _ => Err(format!("Invalid payment mode: {}", s)),
        }
    }
}

/// Payment step outcome. `reference` holds the gateway's id when there is one
/// (e.g. a captured PayPal order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSelection {
    pub mode: PaymentMode,
    pub reference: Option<String>,
}

/// Ephemeral payload bridging checkout, payment and order placement.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub customer: Customer,
    pub items: Vec<OrderLine>,
    pub restaurant_id: Option<String>,
    pub payment: Option<PaymentSelection>,
    pub drafted_at: DateTime<Utc>,
}

impl OrderDraft {
    pub fn with_restaurant(mut self, restaurant_id: Option<String>) -> Self {
        self.restaurant_id = restaurant_id.filter(|id| !id.trim().is_empty());
        self
    }

    pub fn with_payment(mut self, payment: PaymentSelection) -> Self {
        self.payment = Some(payment);
        self
    }

    /// Sum of line subtotals, saturating at `Decimal::MAX`.
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(OrderLine::subtotal)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}
