//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use dailyq_core::{check_window_hours, Config};

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "catalog_path": config.catalog_path,
                    "app_title": config.app_title,
                    "selection_lock_hours": config.selection_lock_hours,
                    "rotation_hours": config.rotation_hours,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:             {}", config.data_dir.display());
            println!(
                "  catalog_path:         {}",
                display_optional(config.catalog_path.as_ref(), "(bundled)")
            );
            println!("  app_title:            {}", config.app_title);
            println!("  selection_lock_hours: {}", config.selection_lock_hours);
            println!("  rotation_hours:       {}", config.rotation_hours);
            println!(
                "  log_file:             {}",
                display_optional(config.log_file.as_ref(), "(not set)")
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            config.data_dir = value.into();
        }
        "catalog_path" => {
            config.catalog_path = optional_path(value);
        }
        "app_title" => {
            if value.trim().is_empty() {
                bail!("app_title cannot be empty");
            }
            config.app_title = value.to_string();
        }
        "selection_lock_hours" => {
            config.selection_lock_hours = parse_hours(key, value)?;
        }
        "rotation_hours" => {
            config.rotation_hours = parse_hours(key, value)?;
        }
        "log_file" => {
            config.log_file = optional_path(value);
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, catalog_path, app_title, selection_lock_hours, \
                 rotation_hours, log_file",
                key
            );
        }
    }
    Ok(())
}

fn optional_path(value: &str) -> Option<PathBuf> {
    if value.is_empty() || value == "none" {
        None
    } else {
        Some(value.into())
    }
}

fn parse_hours(key: &str, value: &str) -> Result<i64> {
    let hours: i64 = value
        .parse()
        .with_context(|| format!("Invalid value for {}. Use a whole number of hours.", key))?;
    check_window_hours(key, hours)?;
    Ok(hours)
}

fn display_optional(path: Option<&PathBuf>, fallback: &str) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();

        apply(&mut config, "selection_lock_hours", "12").unwrap();
        apply(&mut config, "rotation_hours", "0").unwrap();
        apply(&mut config, "app_title", "Morning Words").unwrap();
        apply(&mut config, "catalog_path", "/tmp/authors.json").unwrap();

        assert_eq!(config.selection_lock_hours, 12);
        assert_eq!(config.rotation_hours, 0);
        assert_eq!(config.app_title, "Morning Words");
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/authors.json")));

        apply(&mut config, "catalog_path", "none").unwrap();
        assert_eq!(config.catalog_path, None);
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut config = Config::default();

        assert!(apply(&mut config, "rotation_hours", "-1").is_err());
        assert!(apply(&mut config, "rotation_hours", "soon").is_err());
        assert!(apply(&mut config, "selection_lock_hours", "10000000000").is_err());
        assert!(apply(&mut config, "app_title", "  ").is_err());
        assert!(apply(&mut config, "sync_url", "x").is_err());
        assert_eq!(config.rotation_hours, 24);
    }
}
