//! Saved-quotes ledger
//!
//! The user's bookmarked quotes in save order. Entries are unique by
//! `(quote, author)`; the display fields do not take part in the check.

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, QuoteResult};
use crate::models::SavedQuote;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<SavedQuote>,
}

impl Ledger {
    /// Append an entry, refusing duplicates
    pub fn save(&mut self, entry: SavedQuote) -> QuoteResult<()> {
        if self.entries.iter().any(|e| e.same_quote(&entry)) {
            return Err(QuoteError::DuplicateQuote {
                quote: entry.quote,
                author: entry.author,
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Remove the entry at `index`, shifting later entries down
    pub fn delete(&mut self, index: usize) -> QuoteResult<SavedQuote> {
        if index >= self.entries.len() {
            return Err(QuoteError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    pub fn entries(&self) -> &[SavedQuote] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<SavedQuote> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(quote: &str, author: &str) -> SavedQuote {
        SavedQuote {
            quote: quote.to_string(),
            author: author.to_string(),
            image: format!("https://example.com/{author}.jpg"),
            description: String::new(),
            biography: String::new(),
        }
    }

    #[test]
    fn test_save_appends_in_order() {
        let mut ledger = Ledger::default();
        ledger.save(entry("q0", "A")).unwrap();
        ledger.save(entry("q1", "A")).unwrap();
        ledger.save(entry("q0", "B")).unwrap();

        let quotes: Vec<_> = ledger
            .entries()
            .iter()
            .map(|e| (e.quote.as_str(), e.author.as_str()))
            .collect();
        assert_eq!(quotes, vec![("q0", "A"), ("q1", "A"), ("q0", "B")]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut ledger = Ledger::default();
        ledger.save(entry("q", "A")).unwrap();

        let mut dup = entry("q", "A");
        dup.image = "elsewhere.jpg".to_string();
        let err = ledger.save(dup).unwrap_err();

        assert!(matches!(err, QuoteError::DuplicateQuote { .. }));
        assert!(err.is_user_facing());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_delete_shifts_entries() {
        let mut ledger = Ledger::default();
        for q in ["Q0", "Q1", "Q2"] {
            ledger.save(entry(q, "A")).unwrap();
        }

        let removed = ledger.delete(1).unwrap();
        assert_eq!(removed.quote, "Q1");

        let quotes: Vec<_> = ledger.entries().iter().map(|e| e.quote.as_str()).collect();
        assert_eq!(quotes, vec!["Q0", "Q2"]);
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut ledger = Ledger::default();
        ledger.save(entry("Q0", "A")).unwrap();
        ledger.save(entry("Q1", "A")).unwrap();

        let err = ledger.delete(5).unwrap_err();
        assert!(matches!(err, QuoteError::IndexOutOfRange { index: 5, len: 2 }));
        assert_eq!(ledger.len(), 2);

        assert!(Ledger::default().delete(0).is_err());
    }

    #[test]
    fn test_round_trip() {
        let mut ledger = Ledger::default();
        ledger.save(entry("It's \"quoted\"", "A")).unwrap();
        ledger.save(entry("Q1", "B")).unwrap();

        let json = serde_json::to_string(&ledger).unwrap();
        let parsed: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ledger);
    }
}
