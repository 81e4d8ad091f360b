use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, BoxStream, StreamExt};
use poem_openapi::{
    OpenApi,
    param::Path,
    payload::{EventStream, Json},
};

use business::domain::cart::errors::CartError;
use business::domain::cart::model::LineItemId;
use business::domain::cart::quantity::{Quantity, QuantityChange};
use business::domain::cart::use_cases::add::{AddToCartParams, AddToCartUseCase};
use business::domain::cart::use_cases::change_quantity::{
    ChangeQuantityParams, ChangeQuantityUseCase,
};
use business::domain::cart::use_cases::count::{CartCountParams, CartCountUseCase};
use business::domain::cart::use_cases::load::{LoadCartParams, LoadCartUseCase};
use business::domain::cart::use_cases::remove::{RemoveFromCartParams, RemoveFromCartUseCase};
use business::domain::shared::value_objects::{ProductId, UserId};

use crate::api::cart::dto::{AddToCartRequest, CartCountResponse, CartResponse};
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::security::SessionCookie;
use crate::api::tags::ApiTags;

const KEEP_ALIVE: Duration = Duration::from_secs(15);

pub struct CartApi {
    load_use_case: Arc<dyn LoadCartUseCase>,
    add_use_case: Arc<dyn AddToCartUseCase>,
    change_quantity_use_case: Arc<dyn ChangeQuantityUseCase>,
    remove_use_case: Arc<dyn RemoveFromCartUseCase>,
    count_use_case: Arc<dyn CartCountUseCase>,
}

impl CartApi {
    pub fn new(
        load_use_case: Arc<dyn LoadCartUseCase>,
        add_use_case: Arc<dyn AddToCartUseCase>,
        change_quantity_use_case: Arc<dyn ChangeQuantityUseCase>,
        remove_use_case: Arc<dyn RemoveFromCartUseCase>,
        count_use_case: Arc<dyn CartCountUseCase>,
    ) -> Self {
        Self {
            load_use_case,
            add_use_case,
            change_quantity_use_case,
            remove_use_case,
            count_use_case,
        }
    }

    async fn change_quantity(
        &self,
        user_id: UserId,
        item_id: String,
        change: QuantityChange,
    ) -> CartMutationResponse {
        let params = ChangeQuantityParams {
            user_id,
            item_id: LineItemId::new(item_id),
            change,
        };

        match self.change_quantity_use_case.execute(params).await {
            Ok(snapshot) => CartMutationResponse::Ok(Json(snapshot.into())),
            Err(err) => err.into(),
        }
    }
}

/// Cart of the signed-in user
///
/// Every change is confirmed by the storefront backend before it shows up here.
#[OpenApi]
impl CartApi {
    /// Load the cart
    ///
    /// Always fetches the cart from the backend.
    #[oai(path = "/cart", method = "get", tag = "ApiTags::Cart")]
    async fn get_cart(&self, auth: SessionCookie) -> GetCartResponse {
        match self
            .load_use_case
            .execute(LoadCartParams { user_id: auth.0 })
            .await
        {
            Ok(snapshot) => GetCartResponse::Ok(Json(snapshot.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    409 => GetCartResponse::Conflict(json),
                    _ => GetCartResponse::BadGateway(json),
                }
            }
        }
    }

    /// Add a product
    ///
    /// `merge` (default) bumps the quantity of the line that already holds the
    /// product; `distinct` always asks the backend for a new line.
    #[oai(path = "/cart/items", method = "post", tag = "ApiTags::Cart")]
    async fn add_item(
        &self,
        auth: SessionCookie,
        body: Json<AddToCartRequest>,
    ) -> CartMutationResponse {
        let request = body.0;
        let product_id = request.product_id.trim();
        if product_id.is_empty() {
            return CartMutationResponse::BadRequest(ErrorResponse::new(
                "ValidationError",
                "cart.product_id_required",
            ));
        }

        let quantity = match request.quantity.map(Quantity::new).transpose() {
            Ok(quantity) => quantity.unwrap_or(Quantity::ONE),
            Err(err) => return err.into(),
        };

        let params = AddToCartParams {
            user_id: auth.0,
            product_id: ProductId::new(product_id),
            quantity,
            mode: request.mode.map(Into::into).unwrap_or_default(),
        };

        match self.add_use_case.execute(params).await {
            Ok(snapshot) => CartMutationResponse::Ok(Json(snapshot.into())),
            Err(err) => err.into(),
        }
    }

    /// Increment a line
    #[oai(
        path = "/cart/items/:id/increment",
        method = "post",
        tag = "ApiTags::Cart"
    )]
    async fn increment(&self, auth: SessionCookie, id: Path<String>) -> CartMutationResponse {
        self.change_quantity(auth.0, id.0, QuantityChange::Increment)
            .await
    }

    /// Decrement a line
    ///
    /// At quantity one the decrement is rejected, or removes the line when the
    /// service runs with `CART_DECREMENT_POLICY=remove`.
    #[oai(
        path = "/cart/items/:id/decrement",
        method = "post",
        tag = "ApiTags::Cart"
    )]
    async fn decrement(&self, auth: SessionCookie, id: Path<String>) -> CartMutationResponse {
        self.change_quantity(auth.0, id.0, QuantityChange::Decrement)
            .await
    }

    /// Remove a line
    ///
    /// The backend deletes by product, so every line of that product goes.
    #[oai(path = "/cart/items/:id", method = "delete", tag = "ApiTags::Cart")]
    async fn remove(&self, auth: SessionCookie, id: Path<String>) -> CartMutationResponse {
        let params = RemoveFromCartParams {
            user_id: auth.0,
            item_id: LineItemId::new(id.0),
        };

        match self.remove_use_case.execute(params).await {
            Ok(snapshot) => CartMutationResponse::Ok(Json(snapshot.into())),
            Err(err) => err.into(),
        }
    }

    /// Current item count
    ///
    /// Last published badge value; zero before the cart was first loaded.
    #[oai(path = "/cart/count", method = "get", tag = "ApiTags::Cart")]
    async fn count(&self, auth: SessionCookie) -> Json<CartCountResponse> {
        Json(
            self.count_use_case
                .current(CartCountParams { user_id: auth.0 })
                .into(),
        )
    }

    /// Item count stream
    ///
    /// Server-sent events: the current count first, then every newer one.
    #[oai(path = "/cart/count/stream", method = "get", tag = "ApiTags::Cart")]
    async fn count_stream(
        &self,
        auth: SessionCookie,
    ) -> EventStream<BoxStream<'static, CartCountResponse>> {
        let mut receiver = self
            .count_use_case
            .subscribe(CartCountParams { user_id: auth.0 });
        let initial = CartCountResponse::from(*receiver.borrow_and_update());

        let updates = stream::unfold(receiver, |mut receiver| async move {
            receiver.changed().await.ok()?;
            let count = *receiver.borrow_and_update();
            Some((CartCountResponse::from(count), receiver))
        });

        EventStream::new(stream::once(async move { initial }).chain(updates).boxed())
            .keep_alive(KEEP_ALIVE)
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetCartResponse {
    #[oai(status = 200)]
    Ok(Json<CartResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum CartMutationResponse {
    #[oai(status = 200)]
    Ok(Json<CartResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
}

impl From<CartError> for CartMutationResponse {
    fn from(err: CartError) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            400 => CartMutationResponse::BadRequest(json),
            404 => CartMutationResponse::NotFound(json),
            409 => CartMutationResponse::Conflict(json),
            _ => CartMutationResponse::BadGateway(json),
        }
    }
}
