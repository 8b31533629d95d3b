//! Key-value slot storage

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::instrument;

use super::parse::OptionalExt;
use super::traits::KeyValueStore;
use super::Database;
use crate::error::Result;

/// Slot operations over the `kv_store` table
pub struct KeyValueTable<'a> {
    conn: &'a Connection,
}

impl<'a> KeyValueTable<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    #[instrument(skip(self))]
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Upsert a slot
    #[instrument(skip(self, value), fields(len = value.len()))]
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// SQLite-backed slots, shareable across threads
#[derive(Clone)]
pub struct SqliteKeyValue {
    db: Arc<Mutex<Database>>,
}

impl SqliteKeyValue {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }
}

impl KeyValueStore for SqliteKeyValue {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        lock(&self.db).kv().get(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.db).kv().set(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        lock(&self.db).kv().remove(key)
    }
}

/// Process-local slots (tests, `memory` backend)
#[derive(Default)]
pub struct MemoryKeyValue {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValue {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.items).get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.items).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        lock(&self.items).remove(key);
        Ok(())
    }
}
