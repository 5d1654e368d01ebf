//! Premium author unlocks
//!
//! Authors flagged `locked` in the catalog become selectable once their name
//! is in the unlock set. The set only grows; a full reset is the only way to
//! empty it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::Author;

/// Persisted set of unlocked author names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnlockSet {
    names: BTreeSet<String>,
}

impl UnlockSet {
    /// Add a name. Returns `false` if it was already unlocked.
    pub fn unlock(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Authors that are not locked by default are always unlocked
    pub fn allows(&self, author: &Author) -> bool {
        !author.locked || self.contains(&author.name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
