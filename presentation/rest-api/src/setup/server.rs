use poem::{
    Endpoint, EndpointExt, Route, Server as PoemServer, listener::TcpListener, middleware::Tracing,
};
use poem_openapi::OpenApiService;

use crate::{config::app_config::AppConfig, setup::dependency_injection::DependencyContainer};

pub struct Server;

impl Server {
    /// API, Swagger UI and OpenAPI document, with the identity provider and
    /// operator key attached for the security checkers.
    pub fn routes(container: DependencyContainer, server_url: &str) -> impl Endpoint + use<> {
        let api_service = OpenApiService::new(
            (
                container.health_api,
                container.cart_api,
                container.checkout_api,
                container.order_api,
                container.operator_api,
            ),
            "Storefront Cart API",
            env!("CARGO_PKG_VERSION"),
        )
        .server(server_url);
        let ui = api_service.swagger_ui();
        let spec = api_service.spec_endpoint();

        Route::new()
            .nest("/", api_service)
            .nest("/docs", ui)
            .nest("/openapi.json", spec)
            .data(container.identity)
            .data(container.operator_access)
    }

    pub async fn run(config: AppConfig, container: DependencyContainer) -> anyhow::Result<()> {
        let addr = config.server.bind_address();
        let app = Self::routes(container, &format!("http://{}", addr))
            .with(config.cors)
            .with(Tracing);
        tracing::info!("Server running at http://{}", addr);
        tracing::info!("Swagger UI at http://{}/docs", addr);
        tracing::info!("OpenAPI JSON at http://{}/openapi.json", addr);
        PoemServer::new(TcpListener::bind(&addr)).run(app).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use rust_decimal::Decimal;
    use serde_json::json;

    use business::domain::cart::model::{LineItem, LineItemId};
    use business::domain::cart::quantity::{DecrementPolicy, Quantity};
    use business::domain::cart::repository::CartRepository;
    use business::domain::checkout::model::{Customer, OrderDraft};
    use business::domain::checkout::repository::DeliveryAddressRepository;
    use business::domain::errors::RepositoryError;
    use business::domain::order::model::{Order, OrderId, OrderStatus, OrderedItem};
    use business::domain::order::repository::OrderRepository;
    use business::domain::shared::value_objects::{ProductId, UserId};
    use logger::TracingLogger;

    use super::*;
    use crate::api::security::LegacyCookieIdentity;
    use crate::config::cart_config::CartConfig;
    use crate::config::operator_config::OperatorConfig;
    use crate::setup::dependency_injection::Adapters;

    const SESSION: &str = "token=user-1";

    /// In-memory stand-in for the storefront backend.
    #[derive(Default)]
    struct FakeStorefront {
        lines: Mutex<Vec<LineItem>>,
        next_line: Mutex<u32>,
        addresses: Mutex<Vec<Customer>>,
        placed: Mutex<Vec<OrderDraft>>,
        orders: Mutex<Vec<Order>>,
    }

    impl FakeStorefront {
        fn with_lines(lines: Vec<LineItem>) -> Self {
            Self {
                lines: Mutex::new(lines),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl CartRepository for FakeStorefront {
        async fn get_all(&self, _user_id: &UserId) -> Result<Vec<LineItem>, RepositoryError> {
            Ok(self.lines.lock().unwrap().clone())
        }

        async fn add(
            &self,
            _user_id: &UserId,
            product_id: &ProductId,
            quantity: Quantity,
        ) -> Result<(), RepositoryError> {
            let mut next = self.next_line.lock().unwrap();
            *next += 1;
            self.lines.lock().unwrap().push(LineItem::from_repository(
                LineItemId::new(format!("new-{next}")),
                product_id.clone(),
                None,
                None,
                Some(Decimal::from(100)),
                quantity,
            ));
            Ok(())
        }

        async fn update_quantity(
            &self,
            item_id: &LineItemId,
            quantity: Quantity,
        ) -> Result<(), RepositoryError> {
            let mut lines = self.lines.lock().unwrap();
            let line = lines
                .iter_mut()
                .find(|line| &line.id == item_id)
                .ok_or(RepositoryError::Remote { status: 404 })?;
            line.quantity = quantity;
            Ok(())
        }

        async fn delete_by_product_id(
            &self,
            _user_id: &UserId,
            product_id: &ProductId,
        ) -> Result<(), RepositoryError> {
            self.lines
                .lock()
                .unwrap()
                .retain(|line| &line.product_id != product_id);
            Ok(())
        }
    }

    #[async_trait]
    impl DeliveryAddressRepository for FakeStorefront {
        async fn save_delivery_address(
            &self,
            _user_id: &UserId,
            customer: &Customer,
        ) -> Result<(), RepositoryError> {
            self.addresses.lock().unwrap().push(customer.clone());
            Ok(())
        }
    }

    #[async_trait]
    impl OrderRepository for FakeStorefront {
        async fn place(
            &self,
            _user_id: &UserId,
            draft: &OrderDraft,
        ) -> Result<Option<OrderId>, RepositoryError> {
            self.placed.lock().unwrap().push(draft.clone());
            Ok(Some(OrderId::new("order-1")))
        }

        async fn get_all(&self, _user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
            Ok(self.orders.lock().unwrap().clone())
        }
    }

    fn line(id: &str, product: &str, price: i64, quantity: u32) -> LineItem {
        LineItem::from_repository(
            LineItemId::new(id),
            ProductId::new(product),
            Some(format!("Dish {product}")),
            None,
            Some(Decimal::from(price)),
            Quantity::new(quantity).unwrap(),
        )
    }

    fn two_line_cart() -> Arc<FakeStorefront> {
        Arc::new(FakeStorefront::with_lines(vec![
            line("line-1", "menu-1", 200, 2),
            line("line-2", "menu-2", 150, 1),
        ]))
    }

    fn app_with(
        storefront: Arc<FakeStorefront>,
        policy: DecrementPolicy,
        operator_key: Option<&str>,
    ) -> TestClient<impl Endpoint> {
        let adapters = Adapters {
            cart_repository: storefront.clone(),
            address_repository: storefront.clone(),
            order_repository: storefront,
            identity: Arc::new(LegacyCookieIdentity),
            logger: Arc::new(TracingLogger),
        };
        let container = DependencyContainer::with_adapters(
            adapters,
            CartConfig {
                decrement_policy: policy,
            },
            OperatorConfig {
                api_key: operator_key.map(str::to_string),
            },
        );

        TestClient::new(Server::routes(container, "http://localhost"))
    }

    fn app(storefront: Arc<FakeStorefront>) -> TestClient<impl Endpoint> {
        app_with(storefront, DecrementPolicy::Reject, None)
    }

    #[tokio::test]
    async fn should_report_healthy() {
        let cli = app(two_line_cart());

        let resp = cli.get("/health").send().await;

        resp.assert_status_is_ok();
        resp.json()
            .await
            .value()
            .object()
            .get("status")
            .assert_string("healthy");
    }

    #[tokio::test]
    async fn should_reject_cart_request_without_session_cookie() {
        let cli = app(two_line_cart());

        let resp = cli.get("/cart").send().await;

        resp.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_load_cart_with_totals() {
        let cli = app(two_line_cart());

        let resp = cli.get("/cart").header("Cookie", SESSION).send().await;

        resp.assert_status_is_ok();
        let json = resp.json().await;
        let cart = json.value().object();
        cart.get("total").assert_string("550");
        cart.get("count").assert_i64(3);
        cart.get("items").array().assert_len(2);
    }

    #[tokio::test]
    async fn should_publish_count_after_load() {
        let cli = app(two_line_cart());

        let before = cli.get("/cart/count").header("Cookie", SESSION).send().await;
        before.assert_status_is_ok();
        before
            .json()
            .await
            .value()
            .object()
            .get("count")
            .assert_i64(0);

        cli.get("/cart")
            .header("Cookie", SESSION)
            .send()
            .await
            .assert_status_is_ok();

        let after = cli.get("/cart/count").header("Cookie", SESSION).send().await;
        after
            .json()
            .await
            .value()
            .object()
            .get("count")
            .assert_i64(3);
    }

    #[tokio::test]
    async fn should_increment_line() {
        let storefront = two_line_cart();
        let cli = app(storefront.clone());

        let resp = cli
            .post("/cart/items/line-2/increment")
            .header("Cookie", SESSION)
            .send()
            .await;

        resp.assert_status_is_ok();
        resp.json()
            .await
            .value()
            .object()
            .get("total")
            .assert_string("700");
        assert_eq!(storefront.lines.lock().unwrap()[1].quantity.get(), 2);
    }

    #[tokio::test]
    async fn should_reject_decrement_at_one() {
        let storefront = two_line_cart();
        let cli = app(storefront.clone());

        let resp = cli
            .post("/cart/items/line-2/decrement")
            .header("Cookie", SESSION)
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.json()
            .await
            .value()
            .object()
            .get("message")
            .assert_string("cart.quantity_below_minimum");
        assert_eq!(storefront.lines.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_remove_line_on_decrement_at_one_when_configured() {
        let storefront = two_line_cart();
        let cli = app_with(storefront.clone(), DecrementPolicy::RemoveAtFloor, None);

        let resp = cli
            .post("/cart/items/line-2/decrement")
            .header("Cookie", SESSION)
            .send()
            .await;

        resp.assert_status_is_ok();
        resp.json()
            .await
            .value()
            .object()
            .get("count")
            .assert_i64(2);
        assert_eq!(storefront.lines.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_line() {
        let cli = app(two_line_cart());

        let resp = cli
            .delete("/cart/items/missing")
            .header("Cookie", SESSION)
            .send()
            .await;

        resp.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_merge_added_product_into_existing_line() {
        let storefront = two_line_cart();
        let cli = app(storefront.clone());

        let resp = cli
            .post("/cart/items")
            .header("Cookie", SESSION)
            .body_json(&json!({ "product_id": "menu-1" }))
            .send()
            .await;

        resp.assert_status_is_ok();
        resp.json()
            .await
            .value()
            .object()
            .get("items")
            .array()
            .assert_len(2);
        assert_eq!(storefront.lines.lock().unwrap()[0].quantity.get(), 3);
    }

    #[tokio::test]
    async fn should_add_distinct_line_when_asked() {
        let storefront = two_line_cart();
        let cli = app(storefront.clone());

        let resp = cli
            .post("/cart/items")
            .header("Cookie", SESSION)
            .body_json(&json!({ "product_id": "menu-1", "mode": "distinct" }))
            .send()
            .await;

        resp.assert_status_is_ok();
        resp.json()
            .await
            .value()
            .object()
            .get("items")
            .array()
            .assert_len(3);
    }

    #[tokio::test]
    async fn should_reject_blank_product_id() {
        let cli = app(two_line_cart());

        let resp = cli
            .post("/cart/items")
            .header("Cookie", SESSION)
            .body_json(&json!({ "product_id": "  " }))
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.json()
            .await
            .value()
            .object()
            .get("message")
            .assert_string("cart.product_id_required");
    }

    #[tokio::test]
    async fn should_report_first_missing_checkout_field() {
        let storefront = two_line_cart();
        let cli = app(storefront.clone());

        let resp = cli
            .post("/checkout")
            .header("Cookie", SESSION)
            .body_json(&json!({ "name": "Asha", "line1": "12 MG Road", "city": "Pune" }))
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.json()
            .await
            .value()
            .object()
            .get("message")
            .assert_string("checkout.pincode_required");
        assert!(storefront.addresses.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_place_order_after_checkout_and_payment() {
        let storefront = two_line_cart();
        let cli = app(storefront.clone());
        let form = json!({
            "name": "Asha",
            "line1": "12 MG Road",
            "city": "Pune",
            "pincode": "411001"
        });

        let checkout = cli
            .post("/checkout")
            .header("Cookie", SESSION)
            .body_json(&form)
            .send()
            .await;
        checkout.assert_status_is_ok();
        checkout
            .json()
            .await
            .value()
            .object()
            .get("total")
            .assert_string("550");

        let unpaid = cli.post("/orders").header("Cookie", SESSION).send().await;
        unpaid.assert_status(StatusCode::BAD_REQUEST);
        unpaid
            .json()
            .await
            .value()
            .object()
            .get("message")
            .assert_string("order.payment_mode_missing");

        cli.put("/checkout/payment")
            .header("Cookie", SESSION)
            .body_json(&json!({ "mode": "upi" }))
            .send()
            .await
            .assert_status_is_ok();

        let placed = cli.post("/orders").header("Cookie", SESSION).send().await;
        placed.assert_status(StatusCode::CREATED);
        let json = placed.json().await;
        let order = json.value().object();
        order.get("order_id").assert_string("order-1");
        order.get("payment_mode").assert_string("upi");

        assert_eq!(storefront.addresses.lock().unwrap().len(), 1);
        assert_eq!(storefront.placed.lock().unwrap().len(), 1);

        let again = cli.post("/orders").header("Cookie", SESSION).send().await;
        again.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn should_list_order_history_with_progress() {
        let storefront = two_line_cart();
        storefront.orders.lock().unwrap().push(Order {
            id: OrderId::new("order-9"),
            status: OrderStatus::Preparing,
            items: vec![OrderedItem {
                name: Some("Masala Dosa".to_string()),
                image: None,
                unit_price: Some(Decimal::from(200)),
                quantity: Quantity::ONE,
            }],
            total_amount: Decimal::from(200),
            payment_method: Some("UPI".to_string()),
            restaurant_name: None,
            customer_name: Some("Asha".to_string()),
            created_at: None,
        });
        let cli = app(storefront);

        let resp = cli.get("/orders").header("Cookie", SESSION).send().await;

        resp.assert_status_is_ok();
        let json = resp.json().await;
        let orders = json.value().array();
        orders.assert_len(1);
        orders.get(0).object().get("progress_step").assert_i64(3);
        orders.get(0).object().get("status").assert_string("preparing");
    }

    #[tokio::test]
    async fn should_refuse_operator_stream_without_configured_key() {
        let cli = app(two_line_cart());

        let resp = cli
            .get("/operator/orders/stream")
            .header("x-api-key", "anything")
            .send()
            .await;

        resp.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_refuse_operator_stream_with_wrong_key() {
        let cli = app_with(two_line_cart(), DecrementPolicy::Reject, Some("k1"));

        let resp = cli
            .get("/operator/orders/stream")
            .header("x-api-key", "k2")
            .send()
            .await;

        resp.assert_status(StatusCode::UNAUTHORIZED);
    }
}
