//! Data models for dailyq
//!
//! Catalog entries (`Author`), bookmarked quotes (`SavedQuote`) and the
//! values handed back to the presentation layer.

use serde::{Deserialize, Serialize};

/// An author from the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Author {
    pub id: u32,
    /// Unique within the catalog; used as the selection key
    pub name: String,
    /// Portrait URI
    #[serde(default)]
    pub image: String,
    /// Short description (shown under the portrait)
    #[serde(default)]
    pub description: String,
    /// Longer biography
    #[serde(default)]
    pub biography: String,
    /// Premium author that must be unlocked before selection
    #[serde(default)]
    pub locked: bool,
    pub quotes: Vec<String>,
}

/// A quote the user bookmarked
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedQuote {
    pub quote: String,
    pub author: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub biography: String,
}

impl SavedQuote {
    /// Whether this entry is the same quote by the same author
    pub fn same_quote(&self, other: &SavedQuote) -> bool {
        self.quote == other.quote && self.author == other.author
    }
}

/// The quote of the day for the selected author, ready for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyQuote {
    pub author: String,
    pub quote: String,
    pub image: String,
    pub description: String,
    pub biography: String,
}

impl DailyQuote {
    pub(crate) fn new(author: &Author, quote: impl Into<String>) -> Self {
        Self {
            author: author.name.clone(),
            quote: quote.into(),
            image: author.image.clone(),
            description: author.description.clone(),
            biography: author.biography.clone(),
        }
    }
}

impl From<DailyQuote> for SavedQuote {
    fn from(daily: DailyQuote) -> Self {
        Self {
            quote: daily.quote,
            author: daily.author,
            image: daily.image,
            description: daily.description,
            biography: daily.biography,
        }
    }
}

/// Result of asking for today's quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteOfTheDay {
    /// No author is selected; the caller shows a welcome state
    NoSelection,
    Quote(DailyQuote),
}

impl QuoteOfTheDay {
    pub fn into_quote(self) -> Option<DailyQuote> {
        match self {
            QuoteOfTheDay::NoSelection => None,
            QuoteOfTheDay::Quote(quote) => Some(quote),
        }
    }
}

/// An author as listed on the "discover authors" screen
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuthorStatus {
    pub author: Author,
    pub selected: bool,
    pub unlocked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Author {
        Author {
            id: 1,
            name: "Seneca".to_string(),
            image: "https://example.com/seneca.jpg".to_string(),
            description: "Stoic philosopher".to_string(),
            biography: "Born in Corduba".to_string(),
            locked: false,
            quotes: vec!["Luck is what happens when preparation meets opportunity.".to_string()],
        }
    }

    #[test]
    fn test_daily_quote_copies_author_fields() {
        let author = author();
        let daily = DailyQuote::new(&author, author.quotes[0].clone());

        assert_eq!(daily.author, "Seneca");
        assert_eq!(daily.image, author.image);
        assert_eq!(daily.biography, "Born in Corduba");
    }

    #[test]
    fn test_saved_quote_from_daily() {
        let author = author();
        let saved: SavedQuote = DailyQuote::new(&author, "q").into();
        assert_eq!(saved.quote, "q");
        assert_eq!(saved.author, "Seneca");
        assert_eq!(saved.description, "Stoic philosopher");
    }

    #[test]
    fn test_same_quote_ignores_display_fields() {
        let a = SavedQuote {
            quote: "q".to_string(),
            author: "Seneca".to_string(),
            image: "one.jpg".to_string(),
            description: String::new(),
            biography: String::new(),
        };
        let mut b = a.clone();
        b.image = "two.jpg".to_string();
        assert!(a.same_quote(&b));

        b.author = "Epictetus".to_string();
        assert!(!a.same_quote(&b));
    }

    #[test]
    fn test_author_defaults_for_optional_fields() {
        let json = r#"{"id": 7, "name": "Anon", "quotes": ["x"]}"#;
        let author: Author = serde_json::from_str(json).unwrap();
        assert!(!author.locked);
        assert!(author.biography.is_empty());
    }
}
