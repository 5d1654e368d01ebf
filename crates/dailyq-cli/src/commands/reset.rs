//! Reset command handler

use anyhow::{bail, Result};

use dailyq_core::Session;

use crate::output::Output;
use crate::prompt;

/// Erase selection, rotation state, unlocks, saved quotes and the reminder
pub fn reset(session: &mut Session, yes: bool, output: &Output) -> Result<()> {
    if !yes {
        if !output.should_prompt() {
            bail!("Refusing to reset without --yes");
        }
        if !prompt::confirm("Erase all saved quotes, unlocks and your selection?")? {
            output.message("Cancelled.");
            return Ok(());
        }
    }

    session.reset()?;
    output.success("All data erased");
    Ok(())
}
