//! Change notification for store state
//!
//! Each store keeps its state in a [`StateCell`]: a `tokio::sync::watch`
//! channel for reactive readers plus a list of synchronous observers that
//! run after every committed change (persistence hooks into this).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

/// Receives the full state after each change.
///
/// Observers run on the mutating thread and must not call back into the
/// store that notified them.
pub trait StateObserver<S>: Send + Sync {
    fn on_change(&self, state: &S);
}

impl<S, F> StateObserver<S> for F
where
    F: Fn(&S) + Send + Sync,
{
    fn on_change(&self, state: &S) {
        self(state)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

type ObserverList<S> = Vec<(SubscriptionId, Arc<dyn StateObserver<S>>)>;

pub(crate) struct StateCell<S> {
    tx: watch::Sender<S>,
    observers: Mutex<ObserverList<S>>,
    next_id: AtomicU64,
    /// Held across commit and notify so observers see changes in order
    commit: Mutex<()>,
}

impl<S> StateCell<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(initial: S) -> Self {
        let (tx, _) = watch::channel(initial);
        Self {
            tx,
            observers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            commit: Mutex::new(()),
        }
    }

    pub fn snapshot(&self) -> S {
        self.tx.borrow().clone()
    }

    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub fn watch(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    /// Apply a change to a copy of the state, publish it, and notify.
    ///
    /// Every commit replaces the whole state value.
    pub fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let _commit = lock(&self.commit);
        let mut next = self.snapshot();
        let out = f(&mut next);
        self.tx.send_replace(next);
        self.notify();
        out
    }

    /// Like `update`, but commit only when `f` reports a modification
    pub fn update_if(&self, f: impl FnOnce(&mut S) -> bool) -> bool {
        let _commit = lock(&self.commit);
        let mut next = self.snapshot();
        if !f(&mut next) {
            return false;
        }
        self.tx.send_replace(next);
        self.notify();
        true
    }

    pub fn subscribe(&self, observer: Arc<dyn StateObserver<S>>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.observers).push((id, observer));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = lock(&self.observers);
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    fn notify(&self) {
        let observers: Vec<_> = lock(&self.observers)
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        if observers.is_empty() {
            return;
        }
        let state = self.snapshot();
        for observer in observers {
            observer.on_change(&state);
        }
    }
}
