//! Application state management

use std::sync::{Arc, Mutex};

use tracing::info;
use vlogsnap_core::{
    AppConfig, ContentStore, Database, KeyValueStore, MemoryKeyValue, Result, SessionStore,
    SqliteKeyValue, StorageBackend,
};
use vlogsnap_net::SimulatedGateway;

/// Owns the stores and their collaborators; handed to view models
pub struct AppState {
    pub gateway: Arc<SimulatedGateway>,
    pub session: Arc<SessionStore>,
    pub content: Arc<ContentStore>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let storage = Self::open_storage(&config)?;
        Ok(Self::with_storage(&config, storage))
    }

    /// Wire the stores over an already-open slot backend
    pub fn with_storage(config: &AppConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        let gateway = Arc::new(SimulatedGateway::new(config.gateway.clone()));
        let session = Arc::new(SessionStore::rehydrate(gateway.clone(), storage));
        let content = Arc::new(ContentStore::new(gateway.clone()));

        Self {
            gateway,
            session,
            content,
        }
    }

    fn open_storage(config: &AppConfig) -> Result<Arc<dyn KeyValueStore>> {
        match config.storage.backend {
            StorageBackend::Sqlite => {
                let db_path = config.database_path()?;

                // Ensure parent directory exists
                if let Some(parent) = db_path.parent() {
                    std::fs::create_dir_all(parent)?;
                }

                info!(path = %db_path.display(), "Opening slot storage");
                let db = Database::open(&db_path)?;
                Ok(Arc::new(SqliteKeyValue::new(Arc::new(Mutex::new(db)))))
            }
            StorageBackend::Memory => {
                info!("Using in-memory slot storage");
                Ok(Arc::new(MemoryKeyValue::new()))
            }
        }
    }
}
