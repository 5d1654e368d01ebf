//! Status command handler

use anyhow::Result;

use dailyq_core::{format_remaining, Config, Session};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(session: &Session, config: &Config, output: &Output) -> Result<()> {
    let selection = session.selection()?;
    let lock_remaining = session.selection_lock_remaining()?;
    let unlocked = session.unlocked_authors()?;
    let saved = session.list_quotes()?;
    let schedule = session.notification_schedule()?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "selected": selection.author(),
                    "selected_at": selection.current().map(|s| s.selected_at.to_rfc3339()),
                    "lock_remaining_secs": lock_remaining.map(|d| d.num_seconds()),
                    "unlocked": unlocked.iter().collect::<Vec<_>>(),
                    "counts": {
                        "authors": session.catalog().len(),
                        "saved_quotes": saved.len()
                    },
                    "notification": schedule,
                    "database": config.sqlite_path()
                })
            );
        }
        OutputFormat::Quiet => {
            if let Some(author) = selection.author() {
                println!("{}", author);
            }
        }
        OutputFormat::Human => {
            println!("{} Status", session.app_title());
            println!("{}", "=".repeat(session.app_title().len() + 7));
            println!();
            println!("Selection:");
            match selection.current() {
                Some(current) => {
                    println!("  Author:   {}", current.author);
                    println!(
                        "  Since:    {}",
                        current
                            .selected_at
                            .with_timezone(&chrono::Local)
                            .format("%Y-%m-%d %H:%M")
                    );
                    match lock_remaining {
                        Some(remaining) => println!(
                            "  Switch:   locked for {}",
                            format_remaining(&remaining)
                        ),
                        None => println!("  Switch:   allowed"),
                    }
                }
                None => println!("  (none)"),
            }
            println!();
            println!("Library:");
            println!("  Authors:  {}", session.catalog().len());
            println!(
                "  Unlocked: {}",
                if unlocked.is_empty() {
                    "(none)".to_string()
                } else {
                    unlocked.iter().collect::<Vec<_>>().join(", ")
                }
            );
            println!("  Saved:    {}", saved.len());
            println!();
            println!("Reminder:");
            match schedule {
                Some(schedule) => println!(
                    "  Every day at {} ({})",
                    schedule.time_label(),
                    schedule.author
                ),
                None => println!("  (none)"),
            }
            println!();
            println!("Database: {}", config.sqlite_path().display());
        }
    }

    Ok(())
}
