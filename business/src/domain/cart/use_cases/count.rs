use tokio::sync::watch;

use crate::domain::cart::count::CartCount;
use crate::domain::shared::value_objects::UserId;

pub struct CartCountParams {
    pub user_id: UserId,
}

/// Read side of the cart badge: the last published count and a feed of changes.
pub trait CartCountUseCase: Send + Sync {
    fn current(&self, params: CartCountParams) -> CartCount;
    fn subscribe(&self, params: CartCountParams) -> watch::Receiver<CartCount>;
}
