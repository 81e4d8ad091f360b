use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::cart::count::CartCount;
use crate::domain::cart::session::CartSessions;
use crate::domain::cart::use_cases::count::{CartCountParams, CartCountUseCase};

pub struct CartCountUseCaseImpl {
    pub sessions: Arc<CartSessions>,
}

impl CartCountUseCase for CartCountUseCaseImpl {
    fn current(&self, params: CartCountParams) -> CartCount {
        self.sessions
            .get(&params.user_id)
            .map(|session| session.count())
            .unwrap_or_default()
    }

    fn subscribe(&self, params: CartCountParams) -> watch::Receiver<CartCount> {
        self.sessions.for_user(&params.user_id).subscribe()
    }
}
