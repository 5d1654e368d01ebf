//! Author command handlers

use anyhow::Result;

use dailyq_core::{QuoteError, Session};

use crate::output::Output;

/// List all authors
pub fn list(session: &Session, output: &Output) -> Result<()> {
    let authors = session.authors()?;
    output.print_authors(&authors);
    Ok(())
}

/// Show one author's details
pub fn show(session: &Session, name: &str, output: &Output) -> Result<()> {
    let status = session
        .authors()?
        .into_iter()
        .find(|s| s.author.name == name)
        .ok_or_else(|| QuoteError::UnknownAuthor {
            name: name.to_string(),
        })?;

    output.print_author(&status);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{quiet, session};

    #[test]
    fn test_show_unknown_author_is_user_facing() {
        let session = session();
        let err = show(&session, "Nobody", &quiet()).unwrap_err();

        let quote_err = err.downcast_ref::<QuoteError>().unwrap();
        assert!(quote_err.is_user_facing());
    }

    #[test]
    fn test_list_and_show() {
        let session = session();
        assert!(list(&session, &quiet()).is_ok());
        assert!(show(&session, "Seneca", &quiet()).is_ok());
    }
}
