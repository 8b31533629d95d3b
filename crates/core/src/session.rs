//! Session store
//!
//! Owns the signed-in user. Two phases, anonymous and authenticated;
//! `login` and `register` move to authenticated when the gateway
//! succeeds, `logout` moves back. `is_loading` is set for the duration of
//! a gateway call.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::gateway::AuthGateway;
use crate::models::{Credentials, Registration, User, UserPatch};
use crate::observe::{StateCell, StateObserver, SubscriptionId};
use crate::persist::{load_session, PersistOnChange, SESSION_SLOT};
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Anonymous,
    Authenticated,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        if self.is_authenticated {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }
}

pub struct SessionStore {
    state: StateCell<SessionState>,
    gateway: Arc<dyn AuthGateway>,
}

impl SessionStore {
    /// Start anonymous
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self::with_state(gateway, SessionState::default())
    }

    pub fn with_state(gateway: Arc<dyn AuthGateway>, state: SessionState) -> Self {
        Self {
            state: StateCell::new(state),
            gateway,
        }
    }

    /// Restore from the session slot and keep it saved on every change
    pub fn rehydrate(gateway: Arc<dyn AuthGateway>, storage: Arc<dyn KeyValueStore>) -> Self {
        let state = load_session(storage.as_ref(), SESSION_SLOT);
        info!(
            authenticated = state.is_authenticated,
            "Session rehydrated"
        );
        let store = Self::with_state(gateway, state);
        store.persist_to(storage, SESSION_SLOT);
        store
    }

    /// Attach a save-on-change observer writing to `key`
    pub fn persist_to(&self, storage: Arc<dyn KeyValueStore>, key: &str) -> SubscriptionId {
        self.subscribe(Arc::new(PersistOnChange::new(storage, key)))
    }

    pub fn subscribe(&self, observer: Arc<dyn StateObserver<SessionState>>) -> SubscriptionId {
        self.state.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.state.watch()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.snapshot()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read(|s| s.is_authenticated)
    }

    pub fn is_loading(&self) -> bool {
        self.state.read(|s| s.is_loading)
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.read(SessionState::phase)
    }

    /// Sign in; `false` when the gateway call fails.
    ///
    /// Input checks belong to the caller. Overlapping calls are not
    /// coalesced: whichever resolves last decides the final state.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.begin("login");
        let credentials = Credentials::new(email, password);

        match self.gateway.sign_in(&credentials).await {
            Ok(user) => {
                info!(user_id = %user.id, "Logged in");
                self.sign_in_as(user);
                true
            }
            Err(e) => {
                warn!(error = %e, "Login failed");
                self.state.update(|s| s.is_loading = false);
                false
            }
        }
    }

    /// Create an account and sign in as it; `false` when the gateway call fails
    pub async fn register(&self, registration: Registration) -> bool {
        self.begin("register");

        match self.gateway.sign_up(&registration).await {
            Ok(user) => {
                info!(user_id = %user.id, username = %user.username, "Registered");
                self.sign_in_as(user);
                true
            }
            Err(e) => {
                warn!(error = %e, "Registration failed");
                self.state.update(|s| s.is_loading = false);
                false
            }
        }
    }

    pub fn logout(&self) {
        self.state.update(|s| {
            s.user = None;
            s.is_authenticated = false;
        });
        info!("Logged out");
    }

    /// Merge `patch` into the current user; no-op when anonymous or empty
    pub fn update_user(&self, patch: UserPatch) {
        if patch.is_empty() {
            debug!("update_user ignored: empty patch");
            return;
        }
        let changed = self.state.update_if(|s| match s.user.as_mut() {
            Some(user) => {
                user.apply(patch);
                true
            }
            None => false,
        });
        if !changed {
            debug!("update_user ignored: no current user");
        }
    }

    fn begin(&self, operation: &'static str) {
        if self.is_loading() {
            warn!(operation, "Started while another session call is in flight");
        }
        self.state.update(|s| s.is_loading = true);
    }

    fn sign_in_as(&self, user: User) {
        self.state.update(|s| {
            s.user = Some(user);
            s.is_authenticated = true;
            s.is_loading = false;
        });
    }
}
