//! SQLite key-value backend
//!
//! Durable device storage for the application state. Each `set` is a single
//! upsert statement, so a value is either fully replaced or untouched.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::error::{StorageError, StorageResult};
use super::kv::KeyValueStore;
use super::schema::{init_schema, needs_init};
use crate::config::Config;

/// Key-value store backed by a SQLite database file
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create the database at the configured location
    pub fn open(config: &Config) -> StorageResult<Self> {
        Self::open_path(&config.sqlite_path())
    }

    /// Open or create the database at a specific path
    pub fn open_path(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorageError::from_io(e, parent.to_path_buf()))?;
        }

        debug!("Opening state database at {:?}", path);
        let conn = Connection::open(path)?;

        if needs_init(&conn) {
            init_schema(&conn)?;
        }

        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Number of stored keys
    pub fn key_count(&self) -> StorageResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value, Utc::now().timestamp_millis()],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?", params![key])?;
        Ok(())
    }

    fn clear(&mut self) -> StorageResult<()> {
        self.conn.execute("DELETE FROM kv", [])?;
        Ok(())
    }
}
