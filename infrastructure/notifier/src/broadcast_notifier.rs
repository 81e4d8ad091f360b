use business::domain::order::notifier::{OrderNotifier, OrderPlaced};
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 64;

/// Fans order-placed events out to every connected operator stream.
pub struct BroadcastOrderNotifier {
    sender: broadcast::Sender<OrderPlaced>,
}

impl BroadcastOrderNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OrderPlaced> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastOrderNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl OrderNotifier for BroadcastOrderNotifier {
    fn order_placed(&self, event: OrderPlaced) {
        let order_id = event.order_id.clone();
        match self.sender.send(event) {
            Ok(receivers) => {
                tracing::debug!(order_id = %order_id, receivers, "Order placed event published");
            }
            Err(_) => {
                tracing::debug!(order_id = %order_id, "Order placed event dropped, no operator listening");
            }
        }
    }
}
