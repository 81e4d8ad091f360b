use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::cart::session::CartSessions;
use crate::domain::checkout::drafts::CheckoutDrafts;
use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::{OrderId, PlacedOrder};
use crate::domain::order::notifier::{OrderNotifier, OrderPlaced};
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::use_cases::place::{PlaceOrderParams, PlaceOrderUseCase};

pub struct PlaceOrderUseCaseImpl {
    pub repository: Arc<dyn OrderRepository>,
    pub drafts: Arc<CheckoutDrafts>,
    pub sessions: Arc<CartSessions>,
    pub notifier: Arc<dyn OrderNotifier>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl PlaceOrderUseCase for PlaceOrderUseCaseImpl {
    async fn execute(&self, params: PlaceOrderParams) -> Result<PlacedOrder, OrderError> {
        self.logger
            .info(&format!("Placing order for user: {}", params.user_id));

        let draft = self
            .drafts
            .take(&params.user_id)
            .ok_or(OrderError::NoDraft)?;

        let Some(payment) = draft.payment.clone() else {
            self.drafts.restore(params.user_id.clone(), draft);
            return Err(OrderError::PaymentModeMissing);
        };

        let order_id = match self.repository.place(&params.user_id, &draft).await {
            Ok(id) => id.unwrap_or_else(OrderId::unassigned),
            Err(e) => {
                self.logger.error(&format!(
                    "Order placement failed for user {}: {}",
                    params.user_id, e
                ));
                self.drafts.restore(params.user_id.clone(), draft);
                return Err(OrderError::Remote(e));
            }
        };

        // Clearing the cart is up to the backend; forget what we hold.
        if let Some(session) = self.sessions.get(&params.user_id) {
            session.invalidate();
            drop(session);
            if self.sessions.release(&params.user_id) {
                self.logger
                    .info(&format!("Cart session of user {} released", params.user_id));
            }
        }

        let total_amount = draft.total();
        self.notifier.order_placed(OrderPlaced {
            order_id: order_id.clone(),
            customer_name: draft.customer.name.clone(),
            total_amount,
            placed_at: Utc::now(),
        });

        self.logger.info(&format!(
            "Order {} placed for user {} ({})",
            order_id, params.user_id, payment.mode
        ));
        Ok(PlacedOrder {
            order_id,
            total_amount,
            payment_mode: payment.mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::quantity::Quantity;
    use crate::domain::checkout::model::{
        Customer, OrderDraft, OrderLine, PaymentMode, PaymentSelection,
    };
    use crate::domain::errors::RepositoryError;
    use crate::domain::shared::value_objects::ProductId;
    use crate::test_support::{MockNotifier, MockOrderRepo, line, mock_logger, test_user_id};
    use rust_decimal_macros::dec;

    fn draft(payment: Option<PaymentMode>) -> OrderDraft {
        OrderDraft {
            customer: Customer {
                name: "Asha Rao".to_string(),
                line1: "12 MG Road".to_string(),
                line2: None,
                city: "Pune".to_string(),
                pincode: "411001".to_string(),
            },
            items: vec![
                OrderLine {
                    product_id: ProductId::new("menu-1"),
                    name: Some("Masala Dosa".to_string()),
                    unit_price: dec!(200),
                    quantity: Quantity::new(2).unwrap(),
                },
                OrderLine {
                    product_id: ProductId::new("menu-2"),
                    name: Some("Filter Coffee".to_string()),
                    unit_price: dec!(150),
                    quantity: Quantity::ONE,
                },
            ],
            restaurant_id: Some("resto-7".to_string()),
            payment: payment.map(|mode| PaymentSelection {
                mode,
                reference: None,
            }),
            drafted_at: Utc::now(),
        }
    }

    struct Fixture {
        drafts: Arc<CheckoutDrafts>,
        sessions: Arc<CartSessions>,
    }

    impl Fixture {
        fn new(draft: Option<OrderDraft>) -> Self {
            let drafts = Arc::new(CheckoutDrafts::new());
            if let Some(draft) = draft {
                drafts.store(test_user_id(), draft);
            }
            Self {
                drafts,
                sessions: Arc::new(CartSessions::new()),
            }
        }

        fn use_case(&self, repository: MockOrderRepo, notifier: MockNotifier) -> PlaceOrderUseCaseImpl {
            PlaceOrderUseCaseImpl {
                repository: Arc::new(repository),
                drafts: self.drafts.clone(),
                sessions: self.sessions.clone(),
                notifier: Arc::new(notifier),
                logger: mock_logger(),
            }
        }
    }

    fn params() -> PlaceOrderParams {
        PlaceOrderParams {
            user_id: test_user_id(),
        }
    }

    #[tokio::test]
    async fn should_place_order_discard_draft_and_notify() {
        let fixture = Fixture::new(Some(draft(Some(PaymentMode::CashOnDelivery))));
        let session = fixture.sessions.for_user(&test_user_id());
        session
            .replace(session.load_stamp(), vec![line("a", "menu-1", dec!(200), 2)])
            .unwrap();
        let mut repository = MockOrderRepo::new();
        repository
            .expect_place()
            .times(1)
            .returning(|_, _| Ok(Some(OrderId::new("ord-1"))));
        let mut notifier = MockNotifier::new();
        notifier
            .expect_order_placed()
            .withf(|event| {
                event.order_id == OrderId::new("ord-1")
                    && event.customer_name == "Asha Rao"
                    && event.total_amount == dec!(550)
            })
            .times(1)
            .returning(|_| ());

        let placed = fixture
            .use_case(repository, notifier)
            .execute(params())
            .await
            .unwrap();

        assert_eq!(placed.order_id, OrderId::new("ord-1"));
        assert_eq!(placed.total_amount, dec!(550));
        assert_eq!(placed.payment_mode, PaymentMode::CashOnDelivery);
        assert!(fixture.drafts.get(&test_user_id()).is_none());
        assert!(!session.is_loaded());
    }

    #[tokio::test]
    async fn should_release_cart_session_nobody_watches_after_order() {
        // Arrange
        let fixture = Fixture::new(Some(draft(Some(PaymentMode::CashOnDelivery))));
        let session = fixture.sessions.for_user(&test_user_id());
        session
            .replace(session.load_stamp(), vec![line("a", "menu-1", dec!(200), 2)])
            .unwrap();
        drop(session);
        let mut repository = MockOrderRepo::new();
        repository
            .expect_place()
            .returning(|_, _| Ok(Some(OrderId::new("ord-2"))));
        let mut notifier = MockNotifier::new();
        notifier.expect_order_placed().returning(|_| ());

        // Act
        fixture
            .use_case(repository, notifier)
            .execute(params())
            .await
            .unwrap();

        // Assert
        assert!(fixture.sessions.get(&test_user_id()).is_none());
        assert!(fixture.sessions.is_empty());
    }

    #[tokio::test]
    async fn should_keep_cart_session_with_badge_subscriber_after_order() {
        // Arrange
        let fixture = Fixture::new(Some(draft(Some(PaymentMode::Upi))));
        let receiver = fixture.sessions.for_user(&test_user_id()).subscribe();
        let mut repository = MockOrderRepo::new();
        repository.expect_place().returning(|_, _| Ok(None));
        let mut notifier = MockNotifier::new();
        notifier.expect_order_placed().returning(|_| ());

        // Act
        fixture
            .use_case(repository, notifier)
            .execute(params())
            .await
            .unwrap();

        // Assert
        let session = fixture.sessions.get(&test_user_id()).unwrap();
        assert!(!session.is_loaded());
        drop(receiver);
    }

    #[tokio::test]
    async fn should_report_unassigned_id_when_backend_returns_none() {
        let fixture = Fixture::new(Some(draft(Some(PaymentMode::Upi))));
        let mut repository = MockOrderRepo::new();
        repository.expect_place().returning(|_, _| Ok(None));
        let mut notifier = MockNotifier::new();
        notifier.expect_order_placed().returning(|_| ());

        let placed = fixture
            .use_case(repository, notifier)
            .execute(params())
            .await
            .unwrap();

        assert_eq!(placed.order_id.as_str(), "N/A");
    }

    #[tokio::test]
    async fn should_fail_without_payment_mode_and_skip_remote() {
        let fixture = Fixture::new(Some(draft(None)));
        let mut repository = MockOrderRepo::new();
        repository.expect_place().never();
        let mut notifier = MockNotifier::new();
        notifier.expect_order_placed().never();

        let result = fixture
            .use_case(repository, notifier)
            .execute(params())
            .await;

        assert_eq!(result, Err(OrderError::PaymentModeMissing));
        assert!(fixture.drafts.get(&test_user_id()).is_some());
    }

    #[tokio::test]
    async fn should_fail_without_draft() {
        let fixture = Fixture::new(None);
        let mut repository = MockOrderRepo::new();
        repository.expect_place().never();

        let result = fixture
            .use_case(repository, MockNotifier::new())
            .execute(params())
            .await;

        assert_eq!(result, Err(OrderError::NoDraft));
    }

    #[tokio::test]
    async fn should_keep_draft_and_cart_when_placement_fails() {
        let fixture = Fixture::new(Some(draft(Some(PaymentMode::PayPal))));
        let session = fixture.sessions.for_user(&test_user_id());
        session
            .replace(session.load_stamp(), vec![line("a", "menu-1", dec!(200), 2)])
            .unwrap();
        let mut repository = MockOrderRepo::new();
        repository
            .expect_place()
            .returning(|_, _| Err(RepositoryError::Remote { status: 500 }));
        let mut notifier = MockNotifier::new();
        notifier.expect_order_placed().never();

        let result = fixture
            .use_case(repository, notifier)
            .execute(params())
            .await;

        assert_eq!(
            result,
            Err(OrderError::Remote(RepositoryError::Remote { status: 500 }))
        );
        assert!(fixture.drafts.get(&test_user_id()).is_some());
        assert!(session.is_loaded());
    }
}
