//! dailyq Core Library
//!
//! This crate provides the core functionality for dailyq, a daily quote
//! companion: pick a favorite author, get one quote per day, keep the quotes
//! you like.
//!
//! # Architecture
//!
//! - **Catalog**: read-only authors and quotes (bundled or loaded from JSON)
//! - **Key-value store**: the only durable state, SQLite on disk
//! - **Session**: applies the selection, rotation, unlock and ledger rules
//!   and persists each aggregate as one value
//!
//! # Quick Start
//!
//! ```text
//! let mut session = Session::open()?;
//!
//! session.select_author("Seneca")?;
//! let today = session.daily_quote()?;
//!
//! session.save_daily_quote()?;
//! let saved = session.list_quotes()?;
//! ```
//!
//! # Modules
//!
//! - `session`: Unified interface (main entry point)
//! - `selection`: Selection lock and quote rotation rules
//! - `unlock`: Premium author unlock set
//! - `ledger`: Saved quotes
//! - `notification`: Daily reminder schedule
//! - `reward`: Scoped reward event listeners
//! - `catalog`: Author catalog
//! - `storage`: Key-value backends
//! - `config`: Application configuration

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod notification;
pub mod reward;
pub mod selection;
pub mod session;
pub mod storage;
pub mod unlock;

pub use catalog::{Catalog, CatalogError};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{check_window_hours, Config, Windows, MAX_WINDOW_HOURS};
pub use error::{format_remaining, QuoteError, QuoteResult};
pub use ledger::Ledger;
pub use models::{Author, AuthorStatus, DailyQuote, QuoteOfTheDay, SavedQuote};
pub use notification::{Notification, NotificationSchedule};
pub use reward::{RewardEvent, RewardHub, RewardOutcome, RewardSubscription};
pub use selection::{AuthorRuntimeState, SelectionChange, SelectionState};
pub use session::Session;
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};
pub use unlock::UnlockSet;
