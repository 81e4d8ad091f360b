use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::checkout::errors::CheckoutError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for CheckoutError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let message = self.to_string();
        let (status, name) = match self {
            CheckoutError::Validation(_) | CheckoutError::EmptyCart => {
                (StatusCode::BAD_REQUEST, "ValidationError")
            }
            CheckoutError::NoDraft => (StatusCode::CONFLICT, "Conflict"),
            CheckoutError::Remote(_) => (StatusCode::BAD_GATEWAY, "RemoteError"),
            CheckoutError::Cart(err) => return err.into_error_response(),
        };

        (status, ErrorResponse::new(name, message))
    }
}
