//! Session persistence
//!
//! The session is saved as one JSON blob in a key-value slot after every
//! change and read back once at startup.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::User;
use crate::observe::StateObserver;
use crate::session::SessionState;
use crate::storage::KeyValueStore;

/// Slot holding the serialized session
pub const SESSION_SLOT: &str = "auth-storage";

/// On-disk layout: `{"user": User|null, "isAuthenticated": bool}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

impl From<&SessionState> for PersistedSession {
    fn from(state: &SessionState) -> Self {
        Self {
            user: state.user.clone(),
            is_authenticated: state.is_authenticated,
        }
    }
}

impl PersistedSession {
    /// Authenticated only when a user is present. A stored user without
    /// the authenticated flag is dropped: anonymous never carries a user.
    pub fn into_state(self) -> SessionState {
        match self.user {
            Some(user) if self.is_authenticated => SessionState {
                user: Some(user),
                is_authenticated: true,
                is_loading: false,
            },
            _ => SessionState::default(),
        }
    }
}

/// Read the session from `key`, falling back to anonymous on any problem
pub fn load_session(storage: &dyn KeyValueStore, key: &str) -> SessionState {
    let blob = match storage.get_item(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            debug!(key, "No persisted session");
            return SessionState::default();
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read persisted session");
            return SessionState::default();
        }
    };

    match serde_json::from_str::<PersistedSession>(&blob) {
        Ok(persisted) => persisted.into_state(),
        Err(e) => {
            warn!(key, error = %e, "Discarding corrupt persisted session");
            if let Err(e) = storage.remove_item(key) {
                warn!(key, error = %e, "Failed to clear corrupt session slot");
            }
            SessionState::default()
        }
    }
}

/// Save-on-change observer for the session store
pub struct PersistOnChange {
    storage: Arc<dyn KeyValueStore>,
    key: String,
}

impl PersistOnChange {
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn save(&self, state: &SessionState) -> Result<()> {
        let blob = serde_json::to_string(&PersistedSession::from(state))?;
        self.storage.set_item(&self.key, &blob)
    }
}

impl StateObserver<SessionState> for PersistOnChange {
    fn on_change(&self, state: &SessionState) {
        if let Err(e) = self.save(state) {
            warn!(key = %self.key, error = %e, "Failed to persist session");
        }
    }
}
