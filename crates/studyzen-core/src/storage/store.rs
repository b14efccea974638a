//! SQLite-backed collection store.
//!
//! StudyZen persists flat collections (users, sessions, the achievement
//! unlock log, notifications, forum posts) as JSON array blobs in a
//! key-value table, one blob per collection.
//! Every mutation is a whole-collection read-modify-write; callers run
//! single-threaded, so no internal locking is needed.

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

use super::data_dir;

/// Collection keys. One JSON array blob per key.
pub mod keys {
    pub const USERS: &str = "users";
    pub const SESSIONS: &str = "sessions";
    pub const ACHIEVEMENT_LOG: &str = "achievement_log";
    pub const NOTIFICATIONS: &str = "notifications";
    pub const FORUM_POSTS: &str = "forum_posts";
}

/// SQLite-backed key-value store holding the StudyZen collections.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the store at `~/.config/studyzen/studyzen.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let path = data_dir()?.join("studyzen.db");
        let conn = Connection::open(&path).map_err(|source| StoreError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store, used by tests and ephemeral tooling.
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a raw value from the kv table.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a raw value in the kv table.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Delete a key from the kv table.
    pub fn kv_delete(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Read a collection. A missing key decodes as the empty collection.
    pub fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        match self.kv_get(key)? {
            Some(json) => {
                serde_json::from_str(&json).map_err(|source| StoreError::CorruptCollection {
                    key: key.to_string(),
                    source,
                })
            }
            None => Ok(Vec::new()),
        }
    }

    /// Replace a collection wholesale.
    pub fn write_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_string(items).map_err(|source| StoreError::EncodeFailed {
            key: key.to_string(),
            source,
        })?;
        self.kv_set(key, &json)
    }
}
