//! Author selection and quote rotation
//!
//! ## Selection
//!
//! One author may be selected at a time. Switching to a different author is
//! refused until the lock window (24h by default) has passed since the last
//! selection. Selecting the current author again toggles it off.
//!
//! ## Rotation
//!
//! Each author keeps its own runtime state: the quote currently shown and
//! when it was picked. Within the rotation window the same quote is returned
//! on every call; once the window has elapsed a new quote is drawn uniformly
//! at random (it may repeat the previous one). Windows are rolling and
//! measured from the last pick, not from calendar midnight.
//!
//! Both aggregates are plain values here. `Session` loads them from the
//! store, applies the transitions below, and writes them back whole.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, QuoteResult};
use crate::models::Author;

/// The selected author and when it was selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub author: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub selected_at: DateTime<Utc>,
}

/// Persisted selection singleton
///
/// The author name and the selection timestamp live in one struct, so one
/// can never be stored without the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionState {
    current: Option<Selection>,
}

/// What a successful `toggle` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Selected(String),
    Deselected(String),
}

impl SelectionState {
    pub fn selected(author: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            current: Some(Selection {
                author: author.into(),
                selected_at: at,
            }),
        }
    }

    pub fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    pub fn author(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.author.as_str())
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.author() == Some(name)
    }

    /// Time left before a different author may be selected, if locked
    pub fn lock_remaining(&self, now: DateTime<Utc>, lock: Duration) -> Option<Duration> {
        let current = self.current.as_ref()?;
        let elapsed = now.signed_duration_since(current.selected_at);
        if elapsed < lock {
            Some(lock.checked_sub(&elapsed).unwrap_or(lock))
        } else {
            None
        }
    }

    /// Apply a tap on `author`
    ///
    /// Checks, in order: the re-selection lock (only when switching to a
    /// different author), the author's premium lock, then toggles off if the
    /// author is already selected. `unlocked` is whether the author is
    /// selectable as far as the unlock set is concerned.
    pub fn toggle(
        &self,
        author: &Author,
        unlocked: bool,
        now: DateTime<Utc>,
        lock: Duration,
    ) -> QuoteResult<(SelectionState, SelectionChange)> {
        let same = self.is_selected(&author.name);

        if !same {
            if let (Some(current), Some(remaining)) =
                (self.current.as_ref(), self.lock_remaining(now, lock))
            {
                return Err(QuoteError::SelectionLocked {
                    current: current.author.clone(),
                    remaining,
                });
            }
        }

        if !unlocked {
            return Err(QuoteError::AuthorLocked {
                name: author.name.clone(),
            });
        }

        if same {
            return Ok((
                SelectionState::default(),
                SelectionChange::Deselected(author.name.clone()),
            ));
        }

        Ok((
            SelectionState::selected(author.name.clone(), now),
            SelectionChange::Selected(author.name.clone()),
        ))
    }
}

/// Per-author quote of the day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRuntimeState {
    pub name: String,
    pub selected_quote: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl AuthorRuntimeState {
    pub fn new(name: impl Into<String>, quote: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            selected_quote: quote.into(),
            timestamp: now,
        }
    }

    /// Whether the rotation window has elapsed
    pub fn is_due(&self, now: DateTime<Utc>, window: Duration) -> bool {
        now - self.timestamp >= window
    }

    /// Replace the quote and restart the window
    pub fn rotate(&mut self, quote: impl Into<String>, now: DateTime<Utc>) {
        self.selected_quote = quote.into();
        self.timestamp = now;
    }
}

/// Runtime states for every author seen so far, stored as one aggregate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuntimeStates {
    by_author: BTreeMap<String, AuthorRuntimeState>,
}

/// Outcome of resolving an author's quote of the day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub quote: String,
    /// The runtime state was created or rotated and must be persisted
    pub changed: bool,
}

impl RuntimeStates {
    pub fn get(&self, name: &str) -> Option<&AuthorRuntimeState> {
        self.by_author.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_author.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_author.is_empty()
    }

    pub fn insert(&mut self, state: AuthorRuntimeState) {
        self.by_author.insert(state.name.clone(), state);
    }

    /// Get the author's current quote, creating or rotating it as needed
    pub fn resolve<R: Rng + ?Sized>(
        &mut self,
        author: &Author,
        now: DateTime<Utc>,
        window: Duration,
        rng: &mut R,
    ) -> Resolved {
        match self.by_author.get_mut(&author.name) {
            None => {
                let quote = pick_quote(author, rng);
                self.insert(AuthorRuntimeState::new(&author.name, quote.clone(), now));
                Resolved {
                    quote,
                    changed: true,
                }
            }
            Some(state) if state.is_due(now, window) => {
                let quote = pick_quote(author, rng);
                state.rotate(quote.clone(), now);
                Resolved {
                    quote,
                    changed: true,
                }
            }
            Some(state) => Resolved {
                quote: state.selected_quote.clone(),
                changed: false,
            },
        }
    }
}

/// Draw one of the author's quotes uniformly at random
fn pick_quote<R: Rng + ?Sized>(author: &Author, rng: &mut R) -> String {
    // Catalog validation guarantees at least one quote
    author.quotes.choose(rng).cloned().unwrap_or_default()
}
