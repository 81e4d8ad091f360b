use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use business::domain::checkout::errors::CheckoutError;
use business::domain::checkout::use_cases::prepare::{
    PrepareCheckoutParams, PrepareCheckoutUseCase,
};
use business::domain::checkout::use_cases::select_payment::{
    SelectPaymentParams, SelectPaymentUseCase,
};

use crate::api::checkout::dto::{CheckoutRequest, OrderDraftResponse, SelectPaymentRequest};
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::security::SessionCookie;
use crate::api::tags::ApiTags;

pub struct CheckoutApi {
    prepare_use_case: Arc<dyn PrepareCheckoutUseCase>,
    select_payment_use_case: Arc<dyn SelectPaymentUseCase>,
}

impl CheckoutApi {
    pub fn new(
        prepare_use_case: Arc<dyn PrepareCheckoutUseCase>,
        select_payment_use_case: Arc<dyn SelectPaymentUseCase>,
    ) -> Self {
        Self {
            prepare_use_case,
            select_payment_use_case,
        }
    }
}

/// Checkout
///
/// Turns the cart and the delivery form into an order draft, then records
/// how the user pays for it.
#[OpenApi]
impl CheckoutApi {
    /// Prepare checkout
    ///
    /// Reloads the cart, validates the delivery details and saves them to the
    /// user's profile. Replaces any previous draft.
    #[oai(path = "/checkout", method = "post", tag = "ApiTags::Checkout")]
    async fn prepare(&self, auth: SessionCookie, body: Json<CheckoutRequest>) -> CheckoutResponse {
        let params = PrepareCheckoutParams {
            user_id: auth.0,
            form: body.0.form(),
            restaurant_id: body.0.restaurant_id,
        };

        match self.prepare_use_case.execute(params).await {
            Ok(draft) => CheckoutResponse::Ok(Json(draft.into())),
            Err(err) => err.into(),
        }
    }

    /// Select payment mode
    #[oai(path = "/checkout/payment", method = "put", tag = "ApiTags::Checkout")]
    async fn select_payment(
        &self,
        auth: SessionCookie,
        body: Json<SelectPaymentRequest>,
    ) -> CheckoutResponse {
        let params = SelectPaymentParams {
            user_id: auth.0,
            mode: body.0.mode.into(),
            reference: body.0.reference,
        };

        match self.select_payment_use_case.execute(params).await {
            Ok(draft) => CheckoutResponse::Ok(Json(draft.into())),
            Err(err) => err.into(),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CheckoutResponse {
    #[oai(status = 200)]
    Ok(Json<OrderDraftResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
}

impl From<CheckoutError> for CheckoutResponse {
    fn from(err: CheckoutError) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            400 => CheckoutResponse::BadRequest(json),
            409 => CheckoutResponse::Conflict(json),
            _ => CheckoutResponse::BadGateway(json),
        }
    }
}
