//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/mindbloom/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/mindbloom/` (~/.config/mindbloom/)
//! - Data: `$XDG_DATA_HOME/mindbloom/` (~/.local/share/mindbloom/)
//! - State/Logs: `$XDG_STATE_HOME/mindbloom/` (~/.local/state/mindbloom/)

use crate::error::{Error, Result};
use crate::types::UserId;
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Signed-in user (optional; writes are refused without one)
    #[serde(default)]
    pub user: UserConfig,

    /// Analytics and list display configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Watch mode configuration
    #[serde(default)]
    pub watch: WatchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The user entries are scoped to
#[derive(Debug, Deserialize, Default, Clone)]
pub struct UserConfig {
    /// Identity-provider user id
    pub id: Option<String>,
    /// Display name
    pub name: Option<String>,
}

impl UserConfig {
    /// The configured user id, if any (blank ids count as absent)
    pub fn user_id(&self) -> Option<UserId> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(UserId::from)
    }

    /// Name to greet the user with
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("friend")
    }
}

/// Analytics and list display configuration
#[derive(Debug, Deserialize)]
pub struct AnalyticsConfig {
    /// Number of moods shown in the breakdown
    #[serde(default = "default_breakdown_limit")]
    pub breakdown_limit: usize,

    /// Entries shown in the recent list
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Entries shown in the expanded list
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            breakdown_limit: default_breakdown_limit(),
            recent_limit: default_recent_limit(),
            history_limit: default_history_limit(),
        }
    }
}

impl AnalyticsConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.breakdown_limit == 0 {
            return Err(Error::Config(
                "analytics.breakdown_limit must be at least 1".to_string(),
            ));
        }
        if self.recent_limit == 0 || self.history_limit == 0 {
            return Err(Error::Config(
                "analytics.recent_limit and analytics.history_limit must be at least 1"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

fn default_breakdown_limit() -> usize {
    5
}

fn default_recent_limit() -> usize {
    5
}

fn default_history_limit() -> usize {
    10
}

/// Watch mode configuration
#[derive(Debug, Deserialize)]
pub struct WatchConfig {
    /// Seconds between store refreshes
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
        }
    }
}

fn default_poll_interval() -> u64 {
    2
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.analytics.validate()?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/mindbloom/config.toml` (~/.config/mindbloom/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("mindbloom").join("config.toml")
    }

    /// Returns the data directory path (for the SQLite store)
    ///
    /// `$XDG_DATA_HOME/mindbloom/` (~/.local/share/mindbloom/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("mindbloom")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/mindbloom/` (~/.local/state/mindbloom/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("mindbloom")
    }

    /// Returns the database file path
    ///
    /// `$XDG_DATA_HOME/mindbloom/entries.db`
    pub fn database_path() -> PathBuf {
        Self::data_dir().join("entries.db")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/mindbloom/mindbloom.log`
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("mindbloom.log")
    }

    /// Ensure XDG base directory environment variables are set.
    ///
    /// For CLI binaries that want stable path behavior before anything else
    /// reads these env vars.
    pub fn ensure_xdg_env() {
        let home = home_dir();

        if std::env::var("XDG_DATA_HOME").is_err() {
            std::env::set_var("XDG_DATA_HOME", home.join(".local/share"));
        }

        if std::env::var("XDG_STATE_HOME").is_err() {
            std::env::set_var("XDG_STATE_HOME", home.join(".local/state"));
        }

        if std::env::var("XDG_CONFIG_HOME").is_err() {
            std::env::set_var("XDG_CONFIG_HOME", home.join(".config"));
        }
    }
}
