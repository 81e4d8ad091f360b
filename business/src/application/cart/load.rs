use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartSnapshot;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::session::{CartSession, CartSessions};
use crate::domain::cart::use_cases::load::{LoadCartParams, LoadCartUseCase};
use crate::domain::logger::Logger;

pub struct LoadCartUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub sessions: Arc<CartSessions>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl LoadCartUseCase for LoadCartUseCaseImpl {
    async fn execute(&self, params: LoadCartParams) -> Result<CartSnapshot, CartError> {
        self.logger
            .info(&format!("Loading cart for user: {}", params.user_id));

        let session = self.sessions.for_user(&params.user_id);
        let snapshot = refresh(&session, self.repository.as_ref()).await?;

        self.logger.info(&format!(
            "Cart loaded for user {}: {} lines, {} items",
            params.user_id,
            snapshot.items.len(),
            snapshot.count
        ));
        Ok(snapshot)
    }
}

/// Upper bound on fetches per refresh while local commits keep overtaking them.
const MAX_FETCH_ATTEMPTS: usize = 3;

/// Fetches the remote cart and replaces the session store with it.
///
/// A fetch that a confirmed mutation overtook is fetched again rather than
/// published over the newer state.
pub(crate) async fn refresh(
    session: &CartSession,
    repository: &dyn CartRepository,
) -> Result<CartSnapshot, CartError> {
    let mut attempt = 1;
    loop {
        let stamp = session.load_stamp();
        let items = repository
            .get_all(session.user_id())
            .await
            .map_err(CartError::Fetch)?;

        match session.replace(stamp, items) {
            Err(CartError::Discarded)
                if session.generation() == stamp.generation() && attempt < MAX_FETCH_ATTEMPTS =>
            {
                attempt += 1;
            }
            result => return result,
        }
    }
}

/// Loads the session once if nothing was fetched yet.
pub(crate) async fn ensure_loaded(
    session: &CartSession,
    repository: &dyn CartRepository,
) -> Result<(), CartError> {
    if !session.is_loaded() {
        refresh(session, repository).await?;
    }
    Ok(())
}
