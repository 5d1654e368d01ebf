//! Daily quote and selection command handlers

use anyhow::Result;

use dailyq_core::{QuoteError, QuoteOfTheDay, SelectionChange, Session};

use crate::output::Output;

/// Show today's quote, optionally saving it
pub fn today(session: &mut Session, save: bool, output: &Output) -> Result<()> {
    let today = session.daily_quote()?;
    output.print_daily_quote(&today);

    if save {
        if today == QuoteOfTheDay::NoSelection {
            return Err(QuoteError::NoAuthorSelected.into());
        }
        let saved = session.save_daily_quote()?;
        output.success(&format!("Saved quote by {}", saved.author));
    }

    Ok(())
}

/// Select an author, or deselect it if already selected
pub fn select(session: &mut Session, name: &str, output: &Output) -> Result<()> {
    match session.select_author(name)? {
        SelectionChange::Selected(author) => {
            output.success(&format!("Selected {}", author));
            // Show the first quote right away
            let today = session.daily_quote()?;
            output.print_daily_quote(&today);
        }
        SelectionChange::Deselected(author) => {
            output.success(&format!("Deselected {}", author));
        }
    }
    Ok(())
}

/// Clear the selection
pub fn deselect(session: &mut Session, output: &Output) -> Result<()> {
    let previous = session.selection()?.author().map(str::to_string);
    session.deselect_author()?;

    match previous {
        Some(author) => output.success(&format!("Deselected {}", author)),
        None => output.message("No author was selected."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{quiet, session};

    #[test]
    fn test_today_without_selection() {
        let mut session = session();
        assert!(today(&mut session, false, &quiet()).is_ok());
    }

    #[test]
    fn test_today_save_requires_selection() {
        let mut session = session();
        let err = today(&mut session, true, &quiet()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QuoteError>(),
            Some(QuoteError::NoAuthorSelected)
        ));
    }

    #[test]
    fn test_select_then_save_twice() {
        let mut session = session();
        select(&mut session, "Seneca", &quiet()).unwrap();
        today(&mut session, true, &quiet()).unwrap();

        let err = today(&mut session, true, &quiet()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QuoteError>(),
            Some(QuoteError::DuplicateQuote { .. })
        ));
        assert_eq!(session.list_quotes().unwrap().len(), 1);
    }

    #[test]
    fn test_select_locked_author_refused() {
        let mut session = session();
        let err = select(&mut session, "Epictetus", &quiet()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QuoteError>(),
            Some(QuoteError::AuthorLocked { .. })
        ));
    }

    #[test]
    fn test_deselect_clears() {
        let mut session = session();
        select(&mut session, "Seneca", &quiet()).unwrap();
        deselect(&mut session, &quiet()).unwrap();
        assert_eq!(session.selection().unwrap().author(), None);

        // Nothing selected is fine
        deselect(&mut session, &quiet()).unwrap();
    }
}
