//! Key-value persistence.
//!
//! The manager persists each collection as a JSON string under a logical
//! key (`todos`, `goals`, ...). The store contract is small: get, set,
//! remove, and a prefix-scoped clear. An absent key always means "empty",
//! never an error.

use std::collections::HashMap;

use rusqlite::{params, Connection};

use crate::error::StorageError;

use super::data_dir;

/// Every stored key is namespaced under this prefix so that `clear_all`
/// can wipe this application's data without touching anything else
/// sharing the store.
pub const KEY_PREFIX: &str = "study-catcher-";

/// Persistence contract for the study manager.
pub trait KeyValueStore {
    /// Look up a logical key. Absent keys yield `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value for a logical key, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a logical key. Removing an absent key is a no-op.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Remove every key under this application's prefix, leaving
    /// unrelated entries untouched.
    fn clear_all(&mut self) -> Result<(), StorageError>;
}

/// SQLite-backed key-value store at `~/.config/study-catcher/study-catcher.db`.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database in the data directory, creating the file and
    /// schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir().map_err(StorageError::DataDir)?.join("study-catcher.db");
        Self::open_at(&path)
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &std::path::Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|e| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    fn prefixed(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![Self::prefixed(key)], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![Self::prefixed(key), value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![Self::prefixed(key)])?;
        Ok(())
    }

    fn clear_all(&mut self) -> Result<(), StorageError> {
        self.conn.execute(
            "DELETE FROM kv WHERE key LIKE ?1",
            params![format!("{KEY_PREFIX}%")],
        )?;
        Ok(())
    }
}

/// In-memory store. Backs unit tests and the degraded mode used when the
/// database cannot be opened: the app keeps working, changes just don't
/// survive the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear_all(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        Ok(())
    }
}
