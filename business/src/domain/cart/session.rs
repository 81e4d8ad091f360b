use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tokio::sync::watch;

use super::count::{CartCount, CountPublisher};
use super::errors::CartError;
use super::model::{CartSnapshot, LineItem, LineItemId};
use super::quantity::{Quantity, QuantityChange};
use super::store::CartStore;
use crate::domain::shared::value_objects::{ProductId, UserId};

/// What a mutation in flight is holding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MutationTarget {
    Line(LineItemId),
    Product(ProductId),
}

impl std::fmt::Display for MutationTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MutationTarget::Line(id) => write!(f, "line {}", id),
            MutationTarget::Product(id) => write!(f, "product {}", id),
        }
    }
}

/// Point in the session history a cart fetch was issued at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStamp {
    generation: u64,
    sequence: u64,
}

impl LoadStamp {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
struct SessionState {
    store: CartStore,
    loaded: bool,
    sequence: u64,
}

/// Cart state of one user for the lifetime of a storefront session.
///
/// Remote responses are applied through [`CartSession::replace`] and
/// [`CartSession::apply`], which both take what was observed when the
/// request was issued. After [`CartSession::invalidate`] those responses are
/// discarded instead of being applied to a cart that moved on. A fetched
/// cart is also discarded when anything was committed after it was issued.
#[derive(Debug)]
pub struct CartSession {
    user_id: UserId,
    state: Mutex<SessionState>,
    publisher: CountPublisher,
    in_flight: Mutex<HashSet<MutationTarget>>,
    generation: AtomicU64,
    last_used: Mutex<Instant>,
}

impl CartSession {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            state: Mutex::new(SessionState::default()),
            publisher: CountPublisher::new(),
            in_flight: Mutex::new(HashSet::new()),
            generation: AtomicU64::new(0),
            last_used: Mutex::new(Instant::now()),
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Stamp to issue a cart fetch with; see [`CartSession::replace`].
    pub fn load_stamp(&self) -> LoadStamp {
        let state = self.state();
        LoadStamp {
            generation: self.generation(),
            sequence: state.sequence,
        }
    }

    /// Drops the claim on the current contents: in-flight responses will be
    /// discarded and the next operation reloads from the remote.
    pub fn invalidate(&self) {
        let mut state = self.state();
        self.generation.fetch_add(1, Ordering::SeqCst);
        state.loaded = false;
    }

    pub fn is_loaded(&self) -> bool {
        self.state().loaded
    }

    pub fn line(&self, id: &LineItemId) -> Option<LineItem> {
        self.state().store.line(id).cloned()
    }

    pub fn line_for_product(&self, product_id: &ProductId) -> Option<LineItem> {
        self.state().store.line_for_product(product_id).cloned()
    }

    pub fn quantity_after(
        &self,
        id: &LineItemId,
        change: QuantityChange,
    ) -> Result<Quantity, CartError> {
        self.state().store.quantity_after(id, change)
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.state().store.snapshot()
    }

    /// Marks `target` as busy until the returned lease is dropped.
    ///
    /// A second mutation on the same target fails with `MutationInProgress`
    /// instead of racing the first one.
    pub fn lease(&self, target: MutationTarget) -> Result<MutationLease<'_>, CartError> {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(target.clone()) {
            return Err(CartError::MutationInProgress);
        }
        Ok(MutationLease {
            session: self,
            target,
        })
    }

    /// Replaces the whole store with freshly fetched lines.
    ///
    /// Fails with `Discarded` when a mutation or another load was committed
    /// after `stamp` was taken, since the fetched lines may predate it.
    pub fn replace(&self, stamp: LoadStamp, items: Vec<LineItem>) -> Result<CartSnapshot, CartError> {
        let mut state = self.state();
        self.ensure_current(stamp.generation)?;
        if state.sequence != stamp.sequence {
            return Err(CartError::Discarded);
        }
        state.store = CartStore::from_items(items);
        state.loaded = true;
        Ok(self.commit(&mut state))
    }

    /// Applies a remote-confirmed mutation to the store.
    pub fn apply<F>(&self, issued_at: u64, mutate: F) -> Result<CartSnapshot, CartError>
    where
        F: FnOnce(&mut CartStore) -> Result<(), CartError>,
    {
        let mut state = self.state();
        self.ensure_current(issued_at)?;
        mutate(&mut state.store)?;
        Ok(self.commit(&mut state))
    }

    pub fn count(&self) -> CartCount {
        self.publisher.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<CartCount> {
        self.publisher.subscribe()
    }

    /// True when no mutation is in flight and nobody watches the count.
    pub fn is_idle(&self) -> bool {
        !self.publisher.has_subscribers()
            && self
                .in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .is_empty()
    }

    fn touch(&self) {
        *self.last_used.lock().unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    fn unused_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(
            *self.last_used.lock().unwrap_or_else(PoisonError::into_inner),
        )
    }

    fn ensure_current(&self, issued_at: u64) -> Result<(), CartError> {
        if self.generation() != issued_at {
            return Err(CartError::Discarded);
        }
        Ok(())
    }

    fn commit(&self, state: &mut SessionState) -> CartSnapshot {
        state.sequence += 1;
        self.publisher.publish(state.sequence, state.store.items());
        state.store.snapshot()
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Busy marker for one mutation target; released on drop.
#[derive(Debug)]
pub struct MutationLease<'a> {
    session: &'a CartSession,
    target: MutationTarget,
}

impl Drop for MutationLease<'_> {
    fn drop(&mut self) {
        self.session
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.target);
    }
}

/// Sessions left untouched this long are dropped by the next sweep.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

/// Registry size below which opening a session never triggers a sweep.
const SWEEP_FLOOR: usize = 256;

#[derive(Debug)]
struct Registry {
    sessions: HashMap<UserId, Arc<CartSession>>,
    sweep_at: usize,
}

/// Registry of live cart sessions keyed by user.
///
/// A session is evictable once nothing outside the registry holds it, it is
/// idle, and it was not used for `idle_ttl`. Opening a new session sweeps
/// evictable ones whenever the registry doubled since the last sweep.
#[derive(Debug)]
pub struct CartSessions {
    registry: Mutex<Registry>,
    idle_ttl: Duration,
}

impl Default for CartSessions {
    fn default() -> Self {
        Self::with_idle_ttl(DEFAULT_IDLE_TTL)
    }
}

impl CartSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            registry: Mutex::new(Registry {
                sessions: HashMap::new(),
                sweep_at: SWEEP_FLOOR,
            }),
            idle_ttl,
        }
    }

    /// Returns the user's session, opening an empty, unloaded one if needed.
    pub fn for_user(&self, user_id: &UserId) -> Arc<CartSession> {
        let mut registry = self.registry();
        if !registry.sessions.contains_key(user_id) && registry.sessions.len() >= registry.sweep_at
        {
            sweep(&mut registry.sessions, self.idle_ttl);
            registry.sweep_at = (registry.sessions.len() * 2).max(SWEEP_FLOOR);
        }

        let session = registry
            .sessions
            .entry(user_id.clone())
            .or_insert_with(|| Arc::new(CartSession::new(user_id.clone())))
            .clone();
        session.touch();
        session
    }

    pub fn get(&self, user_id: &UserId) -> Option<Arc<CartSession>> {
        self.registry().sessions.get(user_id).cloned()
    }

    /// Drops the user's session right away if it is unreferenced and idle.
    pub fn release(&self, user_id: &UserId) -> bool {
        let mut registry = self.registry();
        let evictable = registry
            .sessions
            .get(user_id)
            .is_some_and(|session| Arc::strong_count(session) == 1 && session.is_idle());
        if evictable {
            registry.sessions.remove(user_id);
        }
        evictable
    }

    /// Drops every evictable session, returning how many were removed.
    pub fn evict_idle(&self) -> usize {
        sweep(&mut self.registry().sessions, self.idle_ttl)
    }

    pub fn len(&self) -> usize {
        self.registry().sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn sweep(sessions: &mut HashMap<UserId, Arc<CartSession>>, idle_ttl: Duration) -> usize {
    let now = Instant::now();
    let before = sessions.len();
    sessions.retain(|_, session| {
        Arc::strong_count(session) > 1 || !session.is_idle() || session.unused_for(now) < idle_ttl
    });
    before - sessions.len()
}
