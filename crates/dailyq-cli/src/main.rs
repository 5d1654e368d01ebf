//! dailyq CLI
//!
//! Command-line interface for dailyq - one quote a day from your favorite
//! author.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use dailyq_core::{Config, QuoteError, Session, StorageError};

mod commands;
mod logging;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "dailyq")]
#[command(about = "dailyq - A daily quote from your favorite author")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's quote (default)
    Today {
        /// Also add it to your saved quotes
        #[arg(long)]
        save: bool,
    },
    /// List authors with their lock and selection status
    #[command(alias = "ls")]
    Authors,
    /// Show an author's description and biography
    Author {
        /// Author name
        name: String,
    },
    /// Select an author (selecting the current author again deselects it)
    Select {
        /// Author name
        name: String,
    },
    /// Clear the selected author
    Deselect,
    /// Unlock a premium author
    Unlock {
        /// Author name
        name: String,
    },
    /// Manage saved quotes
    Saved {
        #[command(subcommand)]
        command: Option<SavedCommands>,
    },
    /// Manage the daily reminder
    Notify {
        #[command(subcommand)]
        command: Option<NotifyCommands>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show status (selection, lock, counts)
    Status,
    /// Erase all stored state
    Reset {
        /// Don't ask for confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SavedCommands {
    /// List saved quotes
    #[command(alias = "ls")]
    List,
    /// Delete a saved quote by its position in the list
    #[command(alias = "rm")]
    Delete {
        /// Position as shown by `saved list` (starting at 1)
        position: usize,
    },
}

#[derive(Subcommand)]
enum NotifyCommands {
    /// Remind me every day at HH:MM
    Set {
        /// Local time, 24-hour clock
        time: String,
    },
    /// Show the current reminder
    Show,
    /// Remove the reminder
    Cancel,
    /// Stay in the foreground and print each reminder when it fires
    Watch,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, catalog_path, app_title,
        /// selection_lock_hours, rotation_hours, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands work even when the store can't be opened
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config = Config::load_with_cli_override(config_path)?;
    logging::init(&config, cli.verbose);

    let command = cli.command.unwrap_or(Commands::Today { save: false });
    let result = match Session::open_with_config(&config) {
        Ok(mut session) => run(command, &mut session, &config, &output).await,
        Err(err) => Err(err),
    };

    // Expected refusals print as notices
    if let Some(quote_err) = result
        .as_ref()
        .err()
        .and_then(|err| err.downcast_ref::<QuoteError>())
    {
        if quote_err.is_user_facing() {
            output.notice(&quote_err.to_string());
            std::process::exit(1);
        }
    }

    if let Some(hint) = result.as_ref().err().and_then(recovery_hint) {
        output.hint(hint);
    }

    result
}

/// Recovery suggestion for a storage failure anywhere in the error chain
fn recovery_hint(err: &anyhow::Error) -> Option<&'static str> {
    err.chain().find_map(|cause| {
        if let Some(storage) = cause.downcast_ref::<StorageError>() {
            return storage.recovery_suggestion();
        }
        match cause.downcast_ref::<QuoteError>() {
            Some(QuoteError::Storage(storage)) => storage.recovery_suggestion(),
            _ => None,
        }
    })
}

async fn run(
    command: Commands,
    session: &mut Session,
    config: &Config,
    output: &Output,
) -> Result<()> {
    match command {
        Commands::Today { save } => commands::quote::today(session, save, output),
        Commands::Authors => commands::author::list(session, output),
        Commands::Author { name } => commands::author::show(session, &name, output),
        Commands::Select { name } => commands::quote::select(session, &name, output),
        Commands::Deselect => commands::quote::deselect(session, output),
        Commands::Unlock { name } => commands::unlock::unlock(session, &name, output),
        Commands::Saved { command } => match command {
            Some(SavedCommands::List) | None => commands::saved::list(session, output),
            Some(SavedCommands::Delete { position }) => {
                commands::saved::delete(session, position, output)
            }
        },
        Commands::Notify { command } => match command {
            Some(NotifyCommands::Show) | None => commands::notify::show(session, output),
            Some(NotifyCommands::Set { time }) => commands::notify::set(session, &time, output),
            Some(NotifyCommands::Cancel) => commands::notify::cancel(session, output),
            Some(NotifyCommands::Watch) => commands::notify::watch(session, output).await,
        },
        Commands::Status => commands::status::show(session, config, output),
        Commands::Reset { yes } => commands::reset::reset(session, yes, output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    fn corrupt() -> StorageError {
        StorageError::Corrupt {
            key: "saved_quotes".to_string(),
            source: serde_json::from_str::<u32>("{").unwrap_err(),
        }
    }

    #[test]
    fn test_recovery_hint_from_quote_error() {
        let err = anyhow::Error::from(QuoteError::Storage(corrupt()));
        assert!(recovery_hint(&err).unwrap().contains("dailyq reset"));
    }

    #[test]
    fn test_recovery_hint_through_context() {
        let result: Result<(), StorageError> = Err(corrupt());
        let err = result.context("Failed to open state store").unwrap_err();
        assert!(recovery_hint(&err).unwrap().contains("dailyq reset"));
    }

    #[test]
    fn test_no_hint_for_other_errors() {
        let err = anyhow::anyhow!("something else");
        assert!(recovery_hint(&err).is_none());

        let err = anyhow::Error::from(QuoteError::NoAuthorSelected);
        assert!(recovery_hint(&err).is_none());
    }
}
