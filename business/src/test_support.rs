use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use rust_decimal::Decimal;

use crate::domain::cart::model::{LineItem, LineItemId};
use crate::domain::cart::quantity::Quantity;
use crate::domain::cart::repository::CartRepository;
use crate::domain::checkout::model::{Customer, OrderDraft};
use crate::domain::checkout::repository::DeliveryAddressRepository;
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::order::model::{Order, OrderId};
use crate::domain::order::notifier::{OrderNotifier, OrderPlaced};
use crate::domain::order::repository::OrderRepository;
use crate::domain::shared::value_objects::{ProductId, UserId};

mock! {
    pub CartRepo {}

    #[async_trait]
    impl CartRepository for CartRepo {
        async fn get_all(&self, user_id: &UserId) -> Result<Vec<LineItem>, RepositoryError>;
        async fn add(&self, user_id: &UserId, product_id: &ProductId, quantity: Quantity) -> Result<(), RepositoryError>;
        async fn update_quantity(&self, item_id: &LineItemId, quantity: Quantity) -> Result<(), RepositoryError>;
        async fn delete_by_product_id(&self, user_id: &UserId, product_id: &ProductId) -> Result<(), RepositoryError>;
    }
}

mock! {
    pub AddressRepo {}

    #[async_trait]
    impl DeliveryAddressRepository for AddressRepo {
        async fn save_delivery_address(&self, user_id: &UserId, customer: &Customer) -> Result<(), RepositoryError>;
    }
}

mock! {
    pub OrderRepo {}

    #[async_trait]
    impl OrderRepository for OrderRepo {
        async fn place(&self, user_id: &UserId, draft: &OrderDraft) -> Result<Option<OrderId>, RepositoryError>;
        async fn get_all(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError>;
    }
}

mock! {
    pub Notifier {}

    impl OrderNotifier for Notifier {
        fn order_placed(&self, event: OrderPlaced);
    }
}

mock! {
    pub Log {}

    impl Logger for Log {
        fn info(&self, message: &str);
        fn warn(&self, message: &str);
        fn error(&self, message: &str);
        fn debug(&self, message: &str);
    }
}

pub fn mock_logger() -> Arc<dyn Logger> {
    let mut logger = MockLog::new();
    logger.expect_info().returning(|_| ());
    logger.expect_warn().returning(|_| ());
    logger.expect_error().returning(|_| ());
    logger.expect_debug().returning(|_| ());
    Arc::new(logger)
}

pub fn test_user_id() -> UserId {
    UserId::new("test-user-id")
}

pub fn line(id: &str, product: &str, price: Decimal, quantity: u32) -> LineItem {
    LineItem::from_repository(
        LineItemId::new(id),
        ProductId::new(product),
        Some(format!("Dish {product}")),
        None,
        Some(price),
        Quantity::new(quantity).unwrap(),
    )
}
