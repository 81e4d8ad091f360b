use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::order::errors::OrderError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for OrderError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name) = match &self {
            OrderError::NoDraft => (StatusCode::CONFLICT, "Conflict"),
            OrderError::PaymentModeMissing => (StatusCode::BAD_REQUEST, "ValidationError"),
            OrderError::Fetch(_) => (StatusCode::BAD_GATEWAY, "FetchError"),
            OrderError::Remote(_) => (StatusCode::BAD_GATEWAY, "RemoteError"),
        };

        (status, ErrorResponse::new(name, self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::errors::RepositoryError;

    #[test]
    fn should_map_missing_payment_mode_to_bad_request() {
        let (status, json) = OrderError::PaymentModeMissing.into_error_response();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json.0.message, "order.payment_mode_missing");
    }

    #[test]
    fn should_map_failed_placement_to_bad_gateway() {
        let (status, json) =
            OrderError::Remote(RepositoryError::Remote { status: 503 }).into_error_response();

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json.0.name, "RemoteError");
    }
}
