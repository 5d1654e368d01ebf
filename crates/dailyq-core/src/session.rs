//! Session: the single entry point for the presentation layer
//!
//! A `Session` owns one key-value store, one catalog, one clock and one
//! random source for the lifetime of the app. Nothing is cached between
//! calls: every operation reads the aggregate it needs from the store,
//! applies the rules from `selection`, `unlock` or `ledger`, and writes the
//! aggregate back as a single value.
//!
//! Mutating operations take `&mut self`, so two writes to the same aggregate
//! can never interleave within a session.
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = Session::open()?;
//!
//! session.select_author("Seneca")?;
//! if let QuoteOfTheDay::Quote(daily) = session.daily_quote()? {
//!     println!("{} - {}", daily.quote, daily.author);
//! }
//! ```

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::clock::{Clock, SystemClock};
use crate::config::{Config, Windows};
use crate::error::{QuoteError, QuoteResult};
use crate::ledger::Ledger;
use crate::models::{Author, AuthorStatus, DailyQuote, QuoteOfTheDay, SavedQuote};
use crate::notification::{Notification, NotificationSchedule};
use crate::reward::{RewardEvent, RewardOutcome};
use crate::selection::{AuthorRuntimeState, RuntimeStates, SelectionChange, SelectionState};
use crate::storage::{
    keys, read_json, read_json_or_default, write_json, KeyValueStore, SqliteStore,
};
use crate::unlock::UnlockSet;

pub struct Session {
    store: Box<dyn KeyValueStore>,
    catalog: Catalog,
    clock: Box<dyn Clock>,
    rng: StdRng,
    windows: Windows,
    app_title: String,
}

impl Session {
    /// Open a session using the default configuration
    pub fn open() -> anyhow::Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(&config)
    }

    /// Open a session backed by the SQLite store in `config.data_dir`
    pub fn open_with_config(config: &Config) -> anyhow::Result<Self> {
        let catalog = Catalog::for_config(config).context("Failed to load author catalog")?;
        let store = SqliteStore::open(config).context("Failed to open state database")?;

        Ok(Self::new(store, catalog, config.windows()).with_app_title(config.app_title.clone()))
    }

    /// Build a session from explicit parts
    pub fn new(store: impl KeyValueStore + 'static, catalog: Catalog, windows: Windows) -> Self {
        Self {
            store: Box::new(store),
            catalog,
            clock: Box::new(SystemClock),
            rng: StdRng::from_entropy(),
            windows,
            app_title: Config::default().app_title,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_app_title(mut self, title: impl Into<String>) -> Self {
        self.app_title = title.into();
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn app_title(&self) -> &str {
        &self.app_title
    }

    pub fn windows(&self) -> Windows {
        self.windows
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ==================== Catalog ====================

    /// Look up an author (biography, description, quotes)
    pub fn author(&self, name: &str) -> QuoteResult<&Author> {
        self.catalog
            .find(name)
            .ok_or_else(|| QuoteError::UnknownAuthor {
                name: name.to_string(),
            })
    }

    /// Every catalog author with its selected / unlocked flags
    pub fn authors(&self) -> QuoteResult<Vec<AuthorStatus>> {
        let selection = self.load_selection()?;
        let unlocks = self.load_unlocks()?;

        Ok(self
            .catalog
            .authors()
            .iter()
            .map(|author| AuthorStatus {
                author: author.clone(),
                selected: selection.is_selected(&author.name),
                unlocked: unlocks.allows(author),
            })
            .collect())
    }

    // ==================== Selection ====================

    pub fn selection(&self) -> QuoteResult<SelectionState> {
        self.load_selection()
    }

    /// Time left before a different author may be selected
    pub fn selection_lock_remaining(&self) -> QuoteResult<Option<Duration>> {
        Ok(self
            .load_live_selection()?
            .lock_remaining(self.now(), self.windows.selection_lock))
    }

    /// Select `name`, or deselect it if it is already the selected author
    pub fn select_author(&mut self, name: &str) -> QuoteResult<SelectionChange> {
        let author = self.author(name)?;
        let unlocked = self.load_unlocks()?.allows(author);
        let current = self.load_live_selection()?;

        let (next, change) =
            current.toggle(author, unlocked, self.clock.now(), self.windows.selection_lock)?;

        self.store_selection(&next)?;
        info!("Selection changed: {:?}", change);
        Ok(change)
    }

    /// Clear the selection. Idempotent.
    pub fn deselect_author(&mut self) -> QuoteResult<()> {
        self.store.remove(keys::SELECTION)?;
        info!("Selection cleared");
        Ok(())
    }

    // ==================== Daily quote ====================

    /// The quote of the day for the selected author
    pub fn daily_quote(&mut self) -> QuoteResult<QuoteOfTheDay> {
        let selection = self.load_live_selection()?;
        let Some(name) = selection.author() else {
            return Ok(QuoteOfTheDay::NoSelection);
        };

        self.daily_quote_for(name).map(QuoteOfTheDay::Quote)
    }

    /// The quote of the day for any catalog author, creating or rotating
    /// its runtime state as needed
    pub fn daily_quote_for(&mut self, name: &str) -> QuoteResult<DailyQuote> {
        let author = self
            .catalog
            .find(name)
            .ok_or_else(|| QuoteError::UnknownAuthor {
                name: name.to_string(),
            })?;

        let mut states: RuntimeStates =
            read_json_or_default(&*self.store, keys::AUTHOR_RUNTIME_STATE)?;
        let now = self.clock.now();
        let resolved = states.resolve(author, now, self.windows.rotation, &mut self.rng);

        if resolved.changed {
            write_json(&mut *self.store, keys::AUTHOR_RUNTIME_STATE, &states)?;
            info!("New quote of the day for {}", author.name);
        } else {
            debug!("Reusing quote of the day for {}", author.name);
        }

        Ok(DailyQuote::new(author, resolved.quote))
    }

    pub fn runtime_state(&self, name: &str) -> QuoteResult<Option<AuthorRuntimeState>> {
        let states: RuntimeStates =
            read_json_or_default(&*self.store, keys::AUTHOR_RUNTIME_STATE)?;
        Ok(states.get(name).cloned())
    }

    // ==================== Unlocks ====================

    /// Add `name` to the unlock set. Returns `false` if it was already there.
    pub fn unlock_author(&mut self, name: &str) -> QuoteResult<bool> {
        let mut unlocks = self.load_unlocks()?;
        if !unlocks.unlock(name) {
            debug!("{} already unlocked", name);
            return Ok(false);
        }

        write_json(&mut *self.store, keys::UNLOCKED_AUTHORS, &unlocks)?;
        info!("Unlocked {}", name);
        Ok(true)
    }

    /// Whether `name` may be selected as far as premium locks go
    pub fn is_unlocked(&self, name: &str) -> QuoteResult<bool> {
        let unlocks = self.load_unlocks()?;
        Ok(match self.catalog.find(name) {
            Some(author) => unlocks.allows(author),
            None => unlocks.contains(name),
        })
    }

    pub fn unlocked_authors(&self) -> QuoteResult<UnlockSet> {
        self.load_unlocks()
    }

    /// Handle an event from the reward provider
    pub fn apply_reward(&mut self, event: RewardEvent) -> QuoteResult<RewardOutcome> {
        match event {
            RewardEvent::Earned { author } => {
                let newly = self.unlock_author(&author)?;
                Ok(RewardOutcome::Unlocked { author, newly })
            }
            RewardEvent::NotReady => Ok(RewardOutcome::NotReady),
        }
    }

    // ==================== Saved quotes ====================

    pub fn save_quote(&mut self, entry: SavedQuote) -> QuoteResult<()> {
        let mut ledger = self.load_ledger()?;
        ledger.save(entry)?;
        write_json(&mut *self.store, keys::SAVED_QUOTES, &ledger)?;
        info!("Saved quote ({} total)", ledger.len());
        Ok(())
    }

    /// Bookmark the selected author's current quote of the day
    pub fn save_daily_quote(&mut self) -> QuoteResult<SavedQuote> {
        let daily = self
            .daily_quote()?
            .into_quote()
            .ok_or(QuoteError::NoAuthorSelected)?;
        let entry = SavedQuote::from(daily);
        self.save_quote(entry.clone())?;
        Ok(entry)
    }

    pub fn delete_quote(&mut self, index: usize) -> QuoteResult<SavedQuote> {
        let mut ledger = self.load_ledger()?;
        let removed = ledger.delete(index)?;
        write_json(&mut *self.store, keys::SAVED_QUOTES, &ledger)?;
        info!("Deleted saved quote at {}", index);
        Ok(removed)
    }

    pub fn list_quotes(&self) -> QuoteResult<Vec<SavedQuote>> {
        Ok(self.load_ledger()?.into_entries())
    }

    // ==================== Notifications ====================

    /// Remind the user daily at `hour:minute` with the selected author's
    /// quote. Replaces any previous schedule.
    pub fn schedule_notification(
        &mut self,
        hour: u32,
        minute: u32,
    ) -> QuoteResult<NotificationSchedule> {
        let selection = self.load_live_selection()?;
        let author = selection.author().ok_or(QuoteError::NoAuthorSelected)?;

        let schedule = NotificationSchedule::new(hour, minute, author)?;
        write_json(&mut *self.store, keys::NOTIFICATION_SCHEDULE, &schedule)?;
        info!(
            "Notification scheduled at {} for {}",
            schedule.time_label(),
            schedule.author
        );
        Ok(schedule)
    }

    /// Remove the schedule. Returns `false` if none was set.
    pub fn cancel_notification(&mut self) -> QuoteResult<bool> {
        let existed = self.notification_schedule()?.is_some();
        self.store.remove(keys::NOTIFICATION_SCHEDULE)?;
        Ok(existed)
    }

    pub fn notification_schedule(&self) -> QuoteResult<Option<NotificationSchedule>> {
        Ok(read_json(&*self.store, keys::NOTIFICATION_SCHEDULE)?)
    }

    /// Build the reminder content for the scheduled author, if any
    pub fn compose_notification(&mut self) -> QuoteResult<Option<Notification>> {
        let Some(schedule) = self.notification_schedule()? else {
            return Ok(None);
        };
        let daily = self.daily_quote_for(&schedule.author)?;
        Ok(Some(Notification::for_quote(&self.app_title, &daily)))
    }

    // ==================== Maintenance ====================

    /// Erase all stored state (selection, runtime states, unlocks, saved
    /// quotes, schedule)
    pub fn reset(&mut self) -> QuoteResult<()> {
        self.store.clear()?;
        warn!("All stored state cleared");
        Ok(())
    }

    fn load_selection(&self) -> QuoteResult<SelectionState> {
        Ok(read_json_or_default(&*self.store, keys::SELECTION)?)
    }

    /// The stored selection, treated as empty when its author has left the
    /// catalog so it can neither show a quote nor hold the selection lock
    fn load_live_selection(&self) -> QuoteResult<SelectionState> {
        let selection = self.load_selection()?;
        match selection.author() {
            Some(name) if self.catalog.find(name).is_none() => {
                warn!("Selected author '{}' is not in the catalog", name);
                Ok(SelectionState::default())
            }
            _ => Ok(selection),
        }
    }

    fn store_selection(&mut self, state: &SelectionState) -> QuoteResult<()> {
        match state.current() {
            Some(_) => write_json(&mut *self.store, keys::SELECTION, state)?,
            None => self.store.remove(keys::SELECTION)?,
        }
        Ok(())
    }

    fn load_unlocks(&self) -> QuoteResult<UnlockSet> {
        Ok(read_json_or_default(&*self.store, keys::UNLOCKED_AUTHORS)?)
    }

    fn load_ledger(&self) -> QuoteResult<Ledger> {
        Ok(read_json_or_default(&*self.store, keys::SAVED_QUOTES)?)
    }
}
