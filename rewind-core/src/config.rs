//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/rewind/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/rewind/` (~/.config/rewind/)
//! - Data: `$XDG_DATA_HOME/rewind/` (~/.local/share/rewind/)
//! - State/Logs: `$XDG_STATE_HOME/rewind/` (~/.local/state/rewind/)

use crate::analytics::AnalysisOptions;
use crate::error::{Error, Result};
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
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Analysis configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage configuration
#[derive(Debug, Deserialize, Default)]
pub struct StorageConfig {
    /// Override path for the settings database; defaults to the XDG data dir
    pub database_path: Option<PathBuf>,
}

/// Analysis configuration
#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    /// Creators to keep in the watch-history ranking
    #[serde(default = "default_top_creators")]
    pub top_creators: usize,

    /// Words to keep in the search-history ranking
    #[serde(default = "default_top_search_words")]
    pub top_search_words: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_creators: default_top_creators(),
            top_search_words: default_top_search_words(),
        }
    }
}

impl AnalysisConfig {
    /// The configured table sizes as engine options
    pub fn options(&self) -> AnalysisOptions {
        AnalysisOptions {
            top_creators: self.top_creators,
            top_search_words: self.top_search_words,
        }
    }
}

fn default_top_creators() -> usize {
    10
}

fn default_top_search_words() -> usize {
    24
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Override directory for log files; defaults to the XDG state dir
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
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

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/rewind/config.toml` (~/.config/rewind/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("rewind").join("config.toml")
    }

    /// Returns the data directory path (for the SQLite database)
    ///
    /// `$XDG_DATA_HOME/rewind/` (~/.local/share/rewind/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("rewind")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/rewind/` (~/.local/state/rewind/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("rewind")
    }

    /// Returns the settings database path, honoring the config override
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("rewind.db"))
    }

    /// Ensure XDG base directory environment variables are set.
    ///
    /// This is mainly for CLI binaries that want explicit, stable path behavior
    /// before invoking other components that read these env vars.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.storage.database_path.is_none());
        assert_eq!(config.analysis.top_creators, 10);
        assert_eq!(config.analysis.top_search_words, 24);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[storage]
database_path = "/tmp/rewind-test.db"

[analysis]
top_creators = 5

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(
            config.database_path(),
            PathBuf::from("/tmp/rewind-test.db")
        );
        assert_eq!(config.analysis.top_creators, 5);
        // Unset fields keep their defaults
        assert_eq!(config.analysis.top_search_words, 24);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_analysis_options() {
        let config = Config::default();
        let options = config.analysis.options();
        assert_eq!(options.top_creators, 10);
        assert_eq!(options.top_search_words, 24);
    }

    #[test]
    fn test_database_path_default_lives_in_data_dir() {
        let config = Config::default();
        assert!(config.database_path().ends_with("rewind/rewind.db"));
    }
}
