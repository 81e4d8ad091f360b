use std::sync::Arc;

use async_trait::async_trait;

use super::load::ensure_loaded;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartSnapshot;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::session::{CartSessions, MutationTarget};
use crate::domain::cart::use_cases::remove::{RemoveFromCartParams, RemoveFromCartUseCase};
use crate::domain::logger::Logger;

pub struct RemoveFromCartUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub sessions: Arc<CartSessions>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RemoveFromCartUseCase for RemoveFromCartUseCaseImpl {
    async fn execute(&self, params: RemoveFromCartParams) -> Result<CartSnapshot, CartError> {
        self.logger.info(&format!(
            "Removing line {} from cart of user {}",
            params.item_id, params.user_id
        ));

        let session = self.sessions.for_user(&params.user_id);
        let _line_lease = session.lease(MutationTarget::Line(params.item_id.clone()))?;
        ensure_loaded(&session, self.repository.as_ref()).await?;

        let line = session.line(&params.item_id).ok_or(CartError::NotFound)?;
        let _product_lease = session.lease(MutationTarget::Product(line.product_id.clone()))?;
        let issued_at = session.generation();

        self.repository
            .delete_by_product_id(&params.user_id, &line.product_id)
            .await
            .map_err(CartError::from_remote)?;

        let snapshot = session.apply(issued_at, |store| {
            let removed = store.remove_product(&line.product_id);
            if removed > 1 {
                self.logger.warn(&format!(
                    "Product {} had {} lines, all removed",
                    line.product_id, removed
                ));
            }
            Ok(())
        })?;

        self.logger
            .info(&format!("Line {} removed", params.item_id));
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::model::{LineItem, LineItemId};
    use crate::domain::errors::RepositoryError;
    use crate::domain::shared::value_objects::ProductId;
    use crate::test_support::{MockCartRepo, line, mock_logger, test_user_id};
    use rust_decimal_macros::dec;

    fn loaded_sessions(items: Vec<LineItem>) -> Arc<CartSessions> {
        let sessions = Arc::new(CartSessions::new());
        let session = sessions.for_user(&test_user_id());
        session.replace(session.load_stamp(), items).unwrap();
        sessions
    }

    fn use_case(repository: MockCartRepo, sessions: Arc<CartSessions>) -> RemoveFromCartUseCaseImpl {
        RemoveFromCartUseCaseImpl {
            repository: Arc::new(repository),
            sessions,
            logger: mock_logger(),
        }
    }

    fn params(item: &str) -> RemoveFromCartParams {
        RemoveFromCartParams {
            user_id: test_user_id(),
            item_id: LineItemId::new(item),
        }
    }

    #[tokio::test]
    async fn should_delete_by_product_and_publish_count() {
        let sessions = loaded_sessions(vec![
            line("a", "menu-1", dec!(200), 2),
            line("b", "menu-2", dec!(150), 1),
        ]);
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_delete_by_product_id()
            .withf(|user, product| user == &test_user_id() && product == &ProductId::new("menu-1"))
            .times(1)
            .returning(|_, _| Ok(()));

        let snapshot = use_case(mock_repo, sessions.clone())
            .execute(params("a"))
            .await
            .unwrap();

        assert_eq!(snapshot.count, 1);
        assert_eq!(snapshot.total, dec!(150));
        assert_eq!(sessions.for_user(&test_user_id()).count().count, 1);
    }

    #[tokio::test]
    async fn should_fail_with_not_found_and_leave_store_unchanged() {
        let sessions = loaded_sessions(vec![
            line("a", "menu-1", dec!(200), 2),
            line("b", "menu-2", dec!(150), 1),
        ]);
        let session = sessions.for_user(&test_user_id());
        let before = session.count();
        let mut mock_repo = MockCartRepo::new();
        mock_repo.expect_delete_by_product_id().never();

        let result = use_case(mock_repo, sessions.clone())
            .execute(params("missing"))
            .await;

        assert_eq!(result, Err(CartError::NotFound));
        let snapshot = session.snapshot();
        assert_eq!(snapshot.count, 3);
        assert_eq!(snapshot.total, dec!(550));
        assert_eq!(session.count(), before);
    }

    #[tokio::test]
    async fn should_drop_every_line_of_the_removed_product() {
        let sessions = loaded_sessions(vec![
            line("a", "menu-1", dec!(200), 2),
            line("c", "menu-1", dec!(200), 1),
            line("b", "menu-2", dec!(150), 1),
        ]);
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_delete_by_product_id()
            .times(1)
            .returning(|_, _| Ok(()));

        let snapshot = use_case(mock_repo, sessions)
            .execute(params("c"))
            .await
            .unwrap();

        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].id, LineItemId::new("b"));
    }

    #[tokio::test]
    async fn should_map_remote_not_found_to_not_found() {
        let sessions = loaded_sessions(vec![line("a", "menu-1", dec!(200), 2)]);
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_delete_by_product_id()
            .returning(|_, _| Err(RepositoryError::NotFound));

        let result = use_case(mock_repo, sessions.clone())
            .execute(params("a"))
            .await;

        assert_eq!(result, Err(CartError::NotFound));
        assert_eq!(sessions.for_user(&test_user_id()).snapshot().count, 2);
    }
}
