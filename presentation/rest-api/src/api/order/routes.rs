use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use business::domain::order::use_cases::list::{ListOrdersParams, ListOrdersUseCase};
use business::domain::order::use_cases::place::{PlaceOrderParams, PlaceOrderUseCase};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::order::dto::{OrderResponse, PlacedOrderResponse};
use crate::api::security::SessionCookie;
use crate::api::tags::ApiTags;

pub struct OrderApi {
    place_use_case: Arc<dyn PlaceOrderUseCase>,
    list_use_case: Arc<dyn ListOrdersUseCase>,
}

impl OrderApi {
    pub fn new(
        place_use_case: Arc<dyn PlaceOrderUseCase>,
        list_use_case: Arc<dyn ListOrdersUseCase>,
    ) -> Self {
        Self {
            place_use_case,
            list_use_case,
        }
    }
}

/// Orders
#[OpenApi]
impl OrderApi {
    /// Place the order
    ///
    /// Submits the current draft. A payment mode must have been selected. On
    /// failure the draft is kept so the user can retry.
    #[oai(path = "/orders", method = "post", tag = "ApiTags::Orders")]
    async fn place(&self, auth: SessionCookie) -> PlaceOrderResponse {
        match self
            .place_use_case
            .execute(PlaceOrderParams { user_id: auth.0 })
            .await
        {
            Ok(placed) => PlaceOrderResponse::Created(Json(placed.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => PlaceOrderResponse::BadRequest(json),
                    409 => PlaceOrderResponse::Conflict(json),
                    _ => PlaceOrderResponse::BadGateway(json),
                }
            }
        }
    }

    /// Order history
    #[oai(path = "/orders", method = "get", tag = "ApiTags::Orders")]
    async fn list(&self, auth: SessionCookie) -> ListOrdersResponse {
        match self
            .list_use_case
            .execute(ListOrdersParams { user_id: auth.0 })
            .await
        {
            Ok(orders) => {
                let responses: Vec<OrderResponse> = orders.into_iter().map(Into::into).collect();
                ListOrdersResponse::Ok(Json(responses))
            }
            Err(err) => {
                let (_status, json) = err.into_error_response();
                ListOrdersResponse::BadGateway(json)
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum PlaceOrderResponse {
    #[oai(status = 201)]
    Created(Json<PlacedOrderResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum ListOrdersResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<OrderResponse>>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
}
