//! Storage layer
//!
//! The only durable state mechanism is a string-keyed store.
//!
//! ## Backends
//!
//! - **SQLite**: device storage, one row per aggregate
//! - **Memory**: tests and ephemeral sessions
//!
//! Engine modules never talk to a backend directly; they go through
//! `read_json` / `write_json` on a `&dyn KeyValueStore`.

pub mod error;
pub mod kv;
pub mod schema;
pub mod sqlite;

pub use error::{StorageError, StorageResult};
pub use kv::{keys, read_json, read_json_or_default, write_json, KeyValueStore, MemoryStore};
pub use schema::{init_schema, needs_init, SCHEMA_VERSION};
pub use sqlite::SqliteStore;
