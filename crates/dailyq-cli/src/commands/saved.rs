//! Saved quote command handlers

use anyhow::{bail, Result};

use dailyq_core::Session;

use crate::output::Output;

/// List saved quotes
pub fn list(session: &Session, output: &Output) -> Result<()> {
    let saved = session.list_quotes()?;
    output.print_saved(&saved);
    Ok(())
}

/// Delete the saved quote at a 1-based position
pub fn delete(session: &mut Session, position: usize, output: &Output) -> Result<()> {
    let count = session.list_quotes()?.len();
    if position == 0 || position > count {
        bail!(
            "No saved quote at position {} ({} saved). See `dailyq saved list`.",
            position,
            count
        );
    }

    let removed = session.delete_quote(position - 1)?;
    output.success(&format!("Deleted quote by {}", removed.author));
    Ok(())
}
