use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::model::OrderDraft;
use crate::domain::shared::value_objects::UserId;

/// Pending order drafts, at most one per user.
///
/// A draft lives from a successful checkout until the order is placed or a
/// new checkout replaces it.
#[derive(Debug, Default)]
pub struct CheckoutDrafts {
    drafts: Mutex<HashMap<UserId, OrderDraft>>,
}

impl CheckoutDrafts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, user_id: UserId, draft: OrderDraft) {
        self.drafts().insert(user_id, draft);
    }

    pub fn get(&self, user_id: &UserId) -> Option<OrderDraft> {
        self.drafts().get(user_id).cloned()
    }

    /// Rewrites the user's draft in place; `None` when there is no draft.
    pub fn update<F>(&self, user_id: &UserId, change: F) -> Option<OrderDraft>
    where
        F: FnOnce(OrderDraft) -> OrderDraft,
    {
        let mut drafts = self.drafts();
        let draft = drafts.remove(user_id)?;
        let updated = change(draft);
        drafts.insert(user_id.clone(), updated.clone());
        Some(updated)
    }

    /// Removes and returns the draft so that only one caller can place it.
    pub fn take(&self, user_id: &UserId) -> Option<OrderDraft> {
        self.drafts().remove(user_id)
    }

    /// Puts a taken draft back unless a newer one was stored meanwhile.
    pub fn restore(&self, user_id: UserId, draft: OrderDraft) {
        self.drafts().entry(user_id).or_insert(draft);
    }

    fn drafts(&self) -> MutexGuard<'_, HashMap<UserId, OrderDraft>> {
        self.drafts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
