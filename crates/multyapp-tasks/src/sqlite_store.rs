//! SQLite-based key-value storage.
//!
//! One `kv` table holding string values by key. The task list snapshot is a
//! single row.

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::storage::{KeyValueStore, StorageError, StorageResult};

/// SQLite key-value store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store at the given path.
    ///
    /// Creates parent directories, the database file and schema if they don't exist.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::backend(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        tracing::info!("Opened task storage at {}", path.display());
        Ok(store)
    }

    /// Create an in-memory store.
    pub fn in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StorageResult<()> {
        self.conn.lock().execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Number of stored keys.
    pub fn count(&self) -> StorageResult<usize> {
        let count: i64 = self
            .conn
            .lock()
            .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .lock()
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.lock().execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    fn create_test_store() -> SqliteStore {
        SqliteStore::in_memory().expect("Failed to create in-memory store")
    }

    #[test]
    fn test_get_missing_key() {
        let store = create_test_store();
        assert!(store.get("taskList").unwrap().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let store = create_test_store();
        store.set("taskList", "[]").unwrap();
        assert_eq!(store.get("taskList").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_set_replaces_value() {
        let store = create_test_store();
        store.set("taskList", "[]").unwrap();
        store.set("taskList", r#"[{"id":1,"task":"a","completed":true}]"#).unwrap();

        assert_eq!(store.count().unwrap(), 1);
        let value = store.get("taskList").unwrap().unwrap();
        assert!(value.contains("\"completed\":true"));
    }

    #[test]
    fn test_open_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("multyapp.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.set("taskList", "[]").unwrap();
        }

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.get("taskList").unwrap().as_deref(), Some("[]"));
    }
}
