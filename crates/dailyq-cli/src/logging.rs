//! Logging setup
//!
//! Logs go to `config.log_file` when set, otherwise to stderr. RUST_LOG
//! replaces the filter entirely; otherwise the level is debug with
//! `--verbose` and warn by default so normal command output stays clean.

use std::fs::OpenOptions;
use std::sync::Mutex;

use dailyq_core::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn init(config: &Config, verbose: bool) {
    let level = log_level(verbose);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("dailyq_core={},dailyq_cli={}", level, level))
    });

    // Initialization errors mean a subscriber is already set; keep it
    match &config.log_file {
        Some(path) => {
            let file = match OpenOptions::new().create(true).append(true).open(path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not open log file {:?}: {}", path, e);
                    return;
                }
            };
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }

    debug!("Logging initialized");
}

fn log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(false), "warn");
        assert_eq!(log_level(true), "debug");
    }
}
