use chrono::{DateTime, Utc};
use poem_openapi::{Enum, Object};
use rust_decimal::Decimal;

use business::domain::checkout::model::{
    Customer, CustomerForm, OrderDraft, OrderLine, PaymentMode, PaymentSelection,
};

#[derive(Debug, Clone, Object)]
pub struct CheckoutRequest {
    #[oai(default)]
    pub name: String,
    #[oai(default)]
    pub line1: String,
    /// Optional second address line
    #[oai(default)]
    pub line2: String,
    #[oai(default)]
    pub city: String,
    #[oai(default)]
    pub pincode: String,
    /// Restaurant the order is for, when the client knows it
    #[oai(skip_serializing_if_is_none)]
    pub restaurant_id: Option<String>,
}

impl CheckoutRequest {
    pub fn form(&self) -> CustomerForm {
        CustomerForm {
            name: self.name.clone(),
            line1: self.line1.clone(),
            line2: self.line2.clone(),
            city: self.city.clone(),
            pincode: self.pincode.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Enum)]
pub enum PaymentModeDto {
    #[oai(rename = "cash_on_delivery")]
    CashOnDelivery,
    #[oai(rename = "paypal")]
    PayPal,
    #[oai(rename = "upi")]
    Upi,
}

impl From<PaymentModeDto> for PaymentMode {
    fn from(dto: PaymentModeDto) -> Self {
        match dto {
            PaymentModeDto::CashOnDelivery => PaymentMode::CashOnDelivery,
            PaymentModeDto::PayPal => PaymentMode::PayPal,
            PaymentModeDto::Upi => PaymentMode::Upi,
        }
    }
}

impl From<PaymentMode> for PaymentModeDto {
    fn from(mode: PaymentMode) -> Self {
        match mode {
            PaymentMode::CashOnDelivery => PaymentModeDto::CashOnDelivery,
            PaymentMode::PayPal => PaymentModeDto::PayPal,
            PaymentMode::Upi => PaymentModeDto::Upi,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct SelectPaymentRequest {
    pub mode: PaymentModeDto,
    /// Gateway reference, e.g. a captured PayPal order id
    #[oai(skip_serializing_if_is_none)]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Object)]
pub struct CustomerResponse {
    pub name: String,
    pub line1: String,
    #[oai(skip_serializing_if_is_none)]
    pub line2: Option<String>,
    pub city: String,
    pub pincode: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            name: customer.name,
            line1: customer.line1,
            line2: customer.line2,
            city: customer.city,
            pincode: customer.pincode,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct OrderLineResponse {
    pub product_id: String,
    #[oai(skip_serializing_if_is_none)]
    pub name: Option<String>,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        let subtotal = line.subtotal();
        Self {
            product_id: line.product_id.to_string(),
            name: line.name,
            unit_price: line.unit_price,
            quantity: line.quantity.get(),
            subtotal,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct PaymentResponse {
    pub mode: PaymentModeDto,
    #[oai(skip_serializing_if_is_none)]
    pub reference: Option<String>,
}

impl From<PaymentSelection> for PaymentResponse {
    fn from(payment: PaymentSelection) -> Self {
        Self {
            mode: payment.mode.into(),
            reference: payment.reference,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct OrderDraftResponse {
    pub customer: CustomerResponse,
    pub items: Vec<OrderLineResponse>,
    #[oai(skip_serializing_if_is_none)]
    pub restaurant_id: Option<String>,
    /// Absent until a payment mode was selected
    #[oai(skip_serializing_if_is_none)]
    pub payment: Option<PaymentResponse>,
    /// Grand total, in rupees
    pub total: Decimal,
    pub drafted_at: DateTime<Utc>,
}

impl From<OrderDraft> for OrderDraftResponse {
    fn from(draft: OrderDraft) -> Self {
        let total = draft.total();
        Self {
            customer: draft.customer.into(),
            items: draft.items.into_iter().map(Into::into).collect(),
            restaurant_id: draft.restaurant_id,
            payment: draft.payment.map(Into::into),
            total,
            drafted_at: draft.drafted_at,
        }
    }
}
