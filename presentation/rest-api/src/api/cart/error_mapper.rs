use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::cart::errors::CartError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for CartError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name) = match &self {
            CartError::QuantityBelowMinimum => (StatusCode::BAD_REQUEST, "ValidationError"),
            CartError::NotFound => (StatusCode::NOT_FOUND, "NotFound"),
            CartError::MutationInProgress | CartError::Discarded => {
                (StatusCode::CONFLICT, "Conflict")
            }
            CartError::Fetch(_) => (StatusCode::BAD_GATEWAY, "FetchError"),
            CartError::Remote(_) => (StatusCode::BAD_GATEWAY, "RemoteError"),
        };

        (status, ErrorResponse::new(name, self.to_string()))
    }
}
