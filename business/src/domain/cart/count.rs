use serde::Serialize;
use tokio::sync::watch;

use super::model::LineItem;

/// Aggregate cart quantity as observed by badge subscribers.
///
/// `sequence` orders publications; zero means nothing was published yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CartCount {
    pub count: u64,
    pub sequence: u64,
}

/// Sum of quantities across all lines.
pub fn item_count<'a>(items: impl IntoIterator<Item = &'a LineItem>) -> u64 {
    items
        .into_iter()
        .map(|item| u64::from(item.quantity.get()))
        .sum()
}

/// Broadcasts the cart count to every subscriber after each completed store change.
///
/// Publications carry a sequence number; one that is not newer than the last
/// accepted publication is dropped, so subscribers only move forward.
#[derive(Debug)]
pub struct CountPublisher {
    sender: watch::Sender<CartCount>,
}

impl CountPublisher {
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(CartCount::default());
        Self { sender }
    }

    /// Publishes the count of `items` under `sequence`.
    ///
    /// Returns the published count, or `None` when the publication was stale.
    pub fn publish(&self, sequence: u64, items: &[LineItem]) -> Option<u64> {
        let count = item_count(items);
        let accepted = self.sender.send_if_modified(|current| {
            if sequence <= current.sequence {
                return false;
            }
            *current = CartCount { count, sequence };
            true
        });
        accepted.then_some(count)
    }

    pub fn current(&self) -> CartCount {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<CartCount> {
        self.sender.subscribe()
    }

    pub fn has_subscribers(&self) -> bool {
        self.sender.receiver_count() > 0
    }
}

impl Default for CountPublisher {
    fn default() -> Self {
        Self::new()
    }
}
