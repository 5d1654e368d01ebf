//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/dailyq/config.toml)
//! 3. Environment variables (DAILYQ_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix
const ENV_PREFIX: &str = "DAILYQ";

/// Default window, in hours, for both the re-selection lock and rotation
const DEFAULT_WINDOW_HOURS: i64 = 24;

/// Largest accepted window, in hours (100 years)
pub const MAX_WINDOW_HOURS: i64 = 24 * 365 * 100;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for data storage (SQLite state database)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Custom author catalog (JSON). The bundled catalog is used when unset.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Title shown in notifications and the CLI header
    #[serde(default = "default_app_title")]
    pub app_title: String,

    /// Hours before a different author may be selected
    #[serde(default = "default_window_hours")]
    pub selection_lock_hours: i64,

    /// Hours before an author's quote of the day rotates
    #[serde(default = "default_window_hours")]
    pub rotation_hours: i64,

    /// Log file path (optional, defaults to stderr)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            catalog_path: None,
            app_title: default_app_title(),
            selection_lock_hours: DEFAULT_WINDOW_HOURS,
            rotation_hours: DEFAULT_WINDOW_HOURS,
            log_file: None,
        }
    }
}

/// Time windows that gate selection changes and quote rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Windows {
    pub selection_lock: Duration,
    pub rotation: Duration,
}

impl Default for Windows {
    fn default() -> Self {
        Self {
            selection_lock: Duration::hours(DEFAULT_WINDOW_HOURS),
            rotation: Duration::hours(DEFAULT_WINDOW_HOURS),
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var(format!("{}_CATALOG", ENV_PREFIX)) {
            self.catalog_path = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        if let Ok(val) = std::env::var(format!("{}_APP_TITLE", ENV_PREFIX)) {
            if !val.is_empty() {
                self.app_title = val;
            }
        }

        // Unparseable numbers are ignored rather than clobbering file values
        if let Ok(val) = std::env::var(format!("{}_SELECTION_LOCK_HOURS", ENV_PREFIX)) {
            if let Ok(hours) = val.parse() {
                self.selection_lock_hours = hours;
            }
        }

        if let Ok(val) = std::env::var(format!("{}_ROTATION_HOURS", ENV_PREFIX)) {
            if let Ok(hours) = val.parse() {
                self.rotation_hours = hours;
            }
        }

        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }
    }

    fn validate(&self) -> Result<()> {
        check_window_hours("selection_lock_hours", self.selection_lock_hours)?;
        check_window_hours("rotation_hours", self.rotation_hours)?;
        Ok(())
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &PathBuf) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with DAILYQ_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dailyq")
            .join("config.toml")
    }

    /// Get the path to the SQLite state database
    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join("dailyq.db")
    }

    /// Selection lock and rotation windows
    ///
    /// Hours outside `0..=MAX_WINDOW_HOURS` are clamped.
    pub fn windows(&self) -> Windows {
        Windows {
            selection_lock: window_hours(self.selection_lock_hours),
            rotation: window_hours(self.rotation_hours),
        }
    }
}

/// Reject window lengths that are negative or too large to compute with
pub fn check_window_hours(key: &str, hours: i64) -> Result<()> {
    if hours < 0 {
        anyhow::bail!("{} must not be negative (got {})", key, hours);
    }
    if hours > MAX_WINDOW_HOURS {
        anyhow::bail!(
            "{} must be at most {} hours (got {})",
            key,
            MAX_WINDOW_HOURS,
            hours
        );
    }
    Ok(())
}

fn window_hours(hours: i64) -> Duration {
    Duration::hours(hours.clamp(0, MAX_WINDOW_HOURS))
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dailyq")
}

fn default_app_title() -> String {
    "Daily Quotes".to_string()
}

fn default_window_hours() -> i64 {
    DEFAULT_WINDOW_HOURS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "DAILYQ_DATA_DIR",
        "DAILYQ_CATALOG",
        "DAILYQ_APP_TITLE",
        "DAILYQ_SELECTION_LOCK_HOURS",
        "DAILYQ_ROTATION_HOURS",
        "DAILYQ_LOG_FILE",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.catalog_path.is_none());
        assert!(config.log_file.is_none());
        assert_eq!(config.app_title, "Daily Quotes");
        assert_eq!(config.selection_lock_hours, 24);
        assert_eq!(config.rotation_hours, 24);
        assert!(config.data_dir.ends_with("dailyq"));
    }

    #[test]
    fn test_file_paths() {
        let config = Config::default();
        assert!(config.sqlite_path().ends_with("dailyq.db"));
    }

    #[test]
    fn test_windows() {
        let mut config = Config::default();
        assert_eq!(config.windows(), Windows::default());

        config.selection_lock_hours = 1;
        config.rotation_hours = 48;
        let windows = config.windows();
        assert_eq!(windows.selection_lock, Duration::hours(1));
        assert_eq!(windows.rotation, Duration::hours(48));
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("DAILYQ_DATA_DIR", "/tmp/dailyq-test");
        config.apply_env_overrides();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/dailyq-test"));
    }

    #[test]
    fn test_env_override_windows() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("DAILYQ_SELECTION_LOCK_HOURS", "12");
        env::set_var("DAILYQ_ROTATION_HOURS", "6");
        config.apply_env_overrides();
        assert_eq!(config.selection_lock_hours, 12);
        assert_eq!(config.rotation_hours, 6);

        // Garbage is ignored
        env::set_var("DAILYQ_ROTATION_HOURS", "soon");
        config.apply_env_overrides();
        assert_eq!(config.rotation_hours, 6);
    }

    #[test]
    fn test_env_override_catalog_and_title() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("DAILYQ_CATALOG", "/opt/authors.json");
        env::set_var("DAILYQ_APP_TITLE", "Stoic Morning");
        config.apply_env_overrides();
        assert_eq!(config.catalog_path, Some(PathBuf::from("/opt/authors.json")));
        assert_eq!(config.app_title, "Stoic Morning");

        // Empty catalog clears it, empty title keeps current
        env::set_var("DAILYQ_CATALOG", "");
        env::set_var("DAILYQ_APP_TITLE", "");
        config.apply_env_overrides();
        assert!(config.catalog_path.is_none());
        assert_eq!(config.app_title, "Stoic Morning");
    }

    #[test]
    fn test_serialization() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            data_dir: PathBuf::from("/data/dailyq"),
            catalog_path: Some(PathBuf::from("/data/authors.json")),
            app_title: "Quotes".to_string(),
            selection_lock_hours: 12,
            rotation_hours: 24,
            log_file: None,
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("data_dir"));
        assert!(toml_str.contains("catalog_path"));
        assert!(toml_str.contains("selection_lock_hours"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.data_dir, config.data_dir);
        assert_eq!(parsed.catalog_path, config.catalog_path);
        assert_eq!(parsed.app_title, config.app_title);
        assert_eq!(parsed.selection_lock_hours, 12);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            rotation_hours = 12
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert_eq!(config.rotation_hours, 12);
        assert_eq!(config.selection_lock_hours, 24);
        assert_eq!(config.app_title, "Daily Quotes");
    }

    #[test]
    fn test_negative_window_rejected() {
        let _guard = EnvGuard::new(ENV_VARS);

        let result = Config::load_from_str("rotation_hours = -1");
        assert!(result.is_err());
    }

    #[test]
    fn test_oversized_window_rejected() {
        let _guard = EnvGuard::new(ENV_VARS);

        let result = Config::load_from_str("selection_lock_hours = 10000000000");
        assert!(result.is_err());

        let at_max = format!("rotation_hours = {}", MAX_WINDOW_HOURS);
        assert!(Config::load_from_str(&at_max).is_ok());
    }

    #[test]
    fn test_windows_clamp_unvalidated_hours() {
        let config = Config {
            selection_lock_hours: 10_000_000_000_000,
            rotation_hours: -5,
            ..Config::default()
        };

        let windows = config.windows();
        assert_eq!(windows.selection_lock, Duration::hours(MAX_WINDOW_HOURS));
        assert_eq!(windows.rotation, Duration::zero());
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        env::set_var("DAILYQ_DATA_DIR", temp_dir.path().join("data"));

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert!(config.catalog_path.is_none());
        assert!(config.data_dir.exists());
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("conf").join("config.toml");

        let config = Config {
            data_dir: temp_dir.path().join("data"),
            app_title: "Saved".to_string(),
            ..Config::default()
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.app_title, "Saved");
        assert_eq!(loaded.data_dir, temp_dir.path().join("data"));
    }
}
