//! The state container.

use std::sync::Arc;

use crate::store::action::Action;
use crate::store::reducer::{AppReducer, Reducer};
use crate::store::state::AppState;

/// Anything bindings can dispatch actions through.
pub trait Dispatch {
    fn dispatch(&mut self, action: Action);
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&AppState)>;

/// Holds the current [`AppState`] and runs every action through
/// [`AppReducer`].
///
/// Dispatch is synchronous: the reducer runs, the snapshot is replaced and
/// every observer is notified, in subscription order, before `dispatch`
/// returns. Observers only see `&AppState`, so they cannot dispatch while a
/// dispatch is in progress.
pub struct Store {
    state: Arc<AppState>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    dispatched: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
            observers: Vec::new(),
            next_subscription: 0,
            dispatched: 0,
        }
    }

    /// Current snapshot. Later dispatches never mutate it.
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Number of actions dispatched so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&AppState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false when the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn dispatch(&mut self, action: Action) {
        if let Action::ToggleFavoriteImage { image_url } = &action {
            if !self.state.images.contains(image_url) {
                tracing::warn!(image_url = %image_url, "ignoring favorite toggle for unknown image");
            }
        }
        tracing::trace!(action = action.kind(), "dispatch");

        // Copy-on-write: a snapshot still held elsewhere gets cloned first.
        let current = std::mem::take(&mut self.state);
        let next = AppReducer::reduce(Arc::unwrap_or_clone(current), &action);
        self.state = Arc::new(next);
        self.dispatched += 1;

        for (_, observer) in self.observers.iter_mut() {
            observer(&self.state);
        }
    }

    /// Drops every observer. The store keeps its last state.
    pub fn teardown(&mut self) {
        if !self.observers.is_empty() {
            tracing::debug!(observers = self.observers.len(), "store teardown");
        }
        self.observers.clear();
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatch for Store {
    fn dispatch(&mut self, action: Action) {
        Store::dispatch(self, action);
    }
}
