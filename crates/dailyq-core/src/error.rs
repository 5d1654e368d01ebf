//! Errors returned by session operations

use chrono::Duration;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum QuoteError {
    /// A different author was selected less than one lock window ago
    #[error(
        "You can change your author once a day. {current} stays selected for another {}",
        format_remaining(.remaining)
    )]
    SelectionLocked { current: String, remaining: Duration },

    /// Premium author that has not been unlocked yet
    #[error("{name} is locked. Unlock the author first.")]
    AuthorLocked { name: String },

    #[error("This quote by {author} is already saved.")]
    DuplicateQuote { quote: String, author: String },

    /// Stale or invalid index passed by the caller
    #[error("Index {index} is out of range for {len} saved quote(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No author named '{name}' in the catalog")]
    UnknownAuthor { name: String },

    #[error("No author selected. Select an author first.")]
    NoAuthorSelected,

    #[error("Invalid notification time '{time}'. Use HH:MM (24-hour clock).")]
    InvalidSchedule { time: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl QuoteError {
    /// Expected conditions that should be shown to the user as a message
    /// rather than treated as a failure
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            QuoteError::SelectionLocked { .. }
                | QuoteError::AuthorLocked { .. }
                | QuoteError::DuplicateQuote { .. }
                | QuoteError::UnknownAuthor { .. }
                | QuoteError::NoAuthorSelected
                | QuoteError::InvalidSchedule { .. }
        )
    }
}

/// Human-readable remaining time, never less than one minute
pub fn format_remaining(remaining: &Duration) -> String {
    let minutes = remaining.num_minutes().max(1);
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

pub type QuoteResult<T> = Result<T, QuoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_locked_message() {
        let err = QuoteError::SelectionLocked {
            current: "Seneca".to_string(),
            remaining: Duration::minutes(23 * 60 + 5),
        };
        let msg = err.to_string();
        assert!(msg.contains("Seneca"));
        assert!(msg.contains("23h 5m"));
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(&Duration::seconds(20)), "1m");
        assert_eq!(format_remaining(&Duration::minutes(45)), "45m");
        assert_eq!(format_remaining(&Duration::hours(3)), "3h");
    }

    #[test]
    fn test_programming_errors_are_not_user_facing() {
        let err = QuoteError::IndexOutOfRange { index: 5, len: 2 };
        assert!(!err.is_user_facing());
        assert!(err.to_string().contains('5'));

        let err: QuoteError = StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "device gone",
        ))
        .into();
        assert!(!err.is_user_facing());
        assert!(err.to_string().contains("device gone"));
    }
}
