//! Key-value store contract
//!
//! Every persisted aggregate (selection, runtime states, unlocks, saved
//! quotes, notification schedule) is stored as one JSON string under a
//! stable key. A `set` replaces the whole value, so an aggregate is never
//! partially written.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{StorageError, StorageResult};

/// Stable storage keys. Renaming any of these loses user state.
pub mod keys {
    pub const SELECTION: &str = "selection";
    pub const AUTHOR_RUNTIME_STATE: &str = "author_runtime_state";
    pub const UNLOCKED_AUTHORS: &str = "unlocked_authors";
    pub const SAVED_QUOTES: &str = "saved_quotes";
    pub const NOTIFICATION_SCHEDULE: &str = "notification_schedule";
}

/// String-keyed durable storage
pub trait KeyValueStore {
    /// Get the value stored under `key`
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> StorageResult<()>;

    /// Remove every key
    fn clear(&mut self) -> StorageResult<()>;
}

/// In-memory store, used for tests and throwaway sessions
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> StorageResult<()> {
        self.entries.clear();
        Ok(())
    }
}

/// Read and decode a JSON value, returning `None` if the key is absent
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> StorageResult<Option<T>> {
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Read a JSON value, falling back to `T::default()` when absent
pub fn read_json_or_default<T: DeserializeOwned + Default>(
    store: &dyn KeyValueStore,
    key: &str,
) -> StorageResult<T> {
    Ok(read_json(store, key)?.unwrap_or_default())
}

/// Encode a value as JSON and store it under `key`
pub fn write_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}
