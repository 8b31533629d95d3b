//! VlogSnap Core Library
//!
//! Client state for the VlogSnap video app: the session and content
//! stores, their persistence, the gateway traits they call through, and
//! the form and display helpers the screens share.

pub mod config;
pub mod content;
pub mod error;
pub mod format;
pub mod gateway;
pub mod models;
pub mod observe;
pub mod persist;
pub mod session;
pub mod storage;
pub mod validation;

pub use config::{AppConfig, ConfigError, GatewayConfig, StorageBackend};
pub use content::{ContentState, ContentStore};
pub use error::{Error, Result};
pub use format::format_count;
pub use gateway::{AuthGateway, FeedGateway};
pub use models::*;
pub use observe::{StateObserver, SubscriptionId};
pub use persist::{PersistOnChange, PersistedSession, SESSION_SLOT};
pub use session::{SessionPhase, SessionState, SessionStore};
pub use storage::{Database, KeyValueStore, MemoryKeyValue, SqliteKeyValue};
pub use validation::{parse_hashtags, ValidationError};
