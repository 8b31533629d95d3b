//! Storage traits
//!
//! The key-value interface behind persisted client state, allowing
//! different backends (SQLite, in-memory, future remote).

use crate::error::Result;

/// A durable string-to-string map addressed by named slots
pub trait KeyValueStore: Send + Sync {
    /// Read a slot; `None` when it was never written or has been removed
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Create or overwrite a slot
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a slot; removing a missing slot is not an error
    fn remove_item(&self, key: &str) -> Result<()>;
}
