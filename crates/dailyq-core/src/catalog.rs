//! Author catalog
//!
//! The static, read-only list of authors and their quotes. A catalog is
//! bundled into the binary; a custom one can be loaded from a JSON file of
//! the same shape (`{"authors": [...]}`).

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;
use crate::models::Author;

const BUNDLED_CATALOG: &str = include_str!("../data/authors.json");

/// Errors raised while loading a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog format: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Author name '{0}' appears more than once in the catalog")]
    DuplicateName(String),

    #[error("Author '{0}' has no quotes")]
    NoQuotes(String),
}

#[derive(Deserialize)]
struct CatalogFile {
    authors: Vec<Author>,
}

/// Immutable list of authors, in catalog order
#[derive(Debug, Clone)]
pub struct Catalog {
    authors: Vec<Author>,
}

impl Catalog {
    /// The catalog shipped with the application
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Load the configured catalog, or the bundled one when none is set
    pub fn for_config(config: &Config) -> Result<Self, CatalogError> {
        match &config.catalog_path {
            Some(path) => Self::load_from_path(path),
            None => Self::bundled(),
        }
    }

    /// Load a catalog from a JSON file
    pub fn load_from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse a catalog from JSON text
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.authors)
    }

    /// Build a catalog, checking that names are unique and every author
    /// has at least one quote
    pub fn new(authors: Vec<Author>) -> Result<Self, CatalogError> {
        for (i, author) in authors.iter().enumerate() {
            if author.quotes.is_empty() {
                return Err(CatalogError::NoQuotes(author.name.clone()));
            }
            if authors[..i].iter().any(|a| a.name == author.name) {
                return Err(CatalogError::DuplicateName(author.name.clone()));
            }
        }
        Ok(Self { authors })
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Find an author by name
    pub fn find(&self, name: &str) -> Option<&Author> {
        self.authors.iter().find(|a| a.name == name)
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}
