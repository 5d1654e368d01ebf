//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use chrono::{DateTime, Local};
use serde::Serialize;

use dailyq_core::{AuthorStatus, Notification, NotificationSchedule, QuoteOfTheDay, SavedQuote};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the author list
    pub fn print_authors(&self, authors: &[AuthorStatus]) {
        match self.format {
            OutputFormat::Human => {
                if authors.is_empty() {
                    println!("No authors in the catalog.");
                    return;
                }
                for status in authors {
                    let marker = if status.selected { "*" } else { " " };
                    let lock = if status.unlocked { "" } else { " [locked]" };
                    println!(
                        "{} {}{} | {}",
                        marker,
                        status.author.name,
                        lock,
                        truncate(&status.author.description, 50)
                    );
                }
                println!("\n{} author(s)", authors.len());
            }
            OutputFormat::Json => print_json(&authors),
            OutputFormat::Quiet => {
                for status in authors {
                    println!("{}", status.author.name);
                }
            }
        }
    }

    /// Print one author with its description and biography
    pub fn print_author(&self, status: &AuthorStatus) {
        let author = &status.author;
        match self.format {
            OutputFormat::Human => {
                println!("Name:        {}", author.name);
                if !author.description.is_empty() {
                    println!("Description: {}", author.description);
                }
                println!(
                    "Status:      {}{}",
                    if status.unlocked { "available" } else { "locked" },
                    if status.selected { ", selected" } else { "" }
                );
                println!("Quotes:      {}", author.quotes.len());
                if !author.image.is_empty() {
                    println!("Image:       {}", author.image);
                }
                if !author.biography.is_empty() {
                    println!();
                    println!("── Biography ──");
                    println!("{}", author.biography);
                }
            }
            OutputFormat::Json => print_json(status),
            OutputFormat::Quiet => println!("{}", author.name),
        }
    }

    /// Print today's quote, or a welcome hint when nobody is selected
    pub fn print_daily_quote(&self, today: &QuoteOfTheDay) {
        match (self.format, today) {
            (OutputFormat::Human, QuoteOfTheDay::NoSelection) => {
                println!("No author selected yet.");
                println!("Run `dailyq authors` and pick one with `dailyq select <name>`.");
            }
            (OutputFormat::Human, QuoteOfTheDay::Quote(daily)) => {
                println!("\"{}\"", daily.quote);
                println!("    - {}", daily.author);
            }
            (OutputFormat::Json, QuoteOfTheDay::NoSelection) => {
                println!("{}", serde_json::json!({ "selected": false }));
            }
            (OutputFormat::Json, QuoteOfTheDay::Quote(daily)) => print_json(daily),
            (OutputFormat::Quiet, QuoteOfTheDay::NoSelection) => {}
            (OutputFormat::Quiet, QuoteOfTheDay::Quote(daily)) => println!("{}", daily.quote),
        }
    }

    /// Print saved quotes with their 1-based positions
    pub fn print_saved(&self, saved: &[SavedQuote]) {
        match self.format {
            OutputFormat::Human => {
                if saved.is_empty() {
                    println!("No saved quotes.");
                    return;
                }
                for (i, entry) in saved.iter().enumerate() {
                    println!(
                        "{:>3}. \"{}\" - {}",
                        i + 1,
                        truncate(&entry.quote, 60),
                        entry.author
                    );
                }
                println!("\n{} saved quote(s)", saved.len());
            }
            OutputFormat::Json => print_json(&saved),
            OutputFormat::Quiet => {
                for entry in saved {
                    println!("{}", entry.quote);
                }
            }
        }
    }

    /// Print the reminder schedule and its next fire time
    pub fn print_schedule(
        &self,
        schedule: Option<&NotificationSchedule>,
        next: Option<DateTime<Local>>,
    ) {
        match self.format {
            OutputFormat::Human => match schedule {
                None => println!("No reminder scheduled."),
                Some(schedule) => {
                    println!("Reminder:  every day at {}", schedule.time_label());
                    println!("Author:    {}", schedule.author);
                    if let Some(next) = next {
                        println!("Next:      {}", next.format("%Y-%m-%d %H:%M"));
                    }
                }
            },
            OutputFormat::Json => println!(
                "{}",
                serde_json::json!({
                    "schedule": schedule,
                    "next": next.map(|t| t.to_rfc3339()),
                })
            ),
            OutputFormat::Quiet => {
                if let Some(schedule) = schedule {
                    println!("{}", schedule.time_label());
                }
            }
        }
    }

    /// Print a fired reminder
    pub fn print_notification(&self, notification: &Notification) {
        match self.format {
            OutputFormat::Human => {
                println!("── {} ──", notification.title);
                println!("{}", notification.body);
                println!();
            }
            OutputFormat::Json => {
                // One object per line so `watch --json` can be streamed
                match serde_json::to_string(notification) {
                    Ok(line) => println!("{}", line),
                    Err(e) => eprintln!("Error: could not encode output: {}", e),
                }
            }
            OutputFormat::Quiet => println!("{}", notification.body),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an expected refusal (locked author, duplicate, ...)
    pub fn notice(&self, message: &str) {
        match self.format {
            OutputFormat::Human => eprintln!("! {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "refused", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a recovery suggestion after a failure
    pub fn hint(&self, hint: &str) {
        match self.format {
            OutputFormat::Human => eprintln!("Hint: {}", hint),
            OutputFormat::Json => {
                eprintln!("{}", serde_json::json!({"hint": hint}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: could not encode output: {}", e),
    }
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("Übermensch über alles", 8), "Überm...");
        assert_eq!(truncate("éé", 2), "éé");
    }

    #[test]
    fn test_should_prompt_only_for_humans() {
        assert!(Output::new(OutputFormat::Human).should_prompt());
        assert!(!Output::new(OutputFormat::Json).should_prompt());
        assert!(!Output::new(OutputFormat::Quiet).should_prompt());
    }
}
