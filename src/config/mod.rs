//! Configuration loading and validation.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calculate::{Paginator, WindowSpec, INITIAL_ROWS, ROWS_PER_LOAD};
use crate::models::RaceDate;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Leaderboard pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Rows shown before any "load more"
    #[serde(default = "default_initial_rows")]
    pub initial_rows: usize,

    /// Rows added per "load more"
    #[serde(default = "default_rows_per_load")]
    pub rows_per_load: usize,
}

fn default_initial_rows() -> usize {
    INITIAL_ROWS
}

fn default_rows_per_load() -> usize {
    ROWS_PER_LOAD
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            initial_rows: default_initial_rows(),
            rows_per_load: default_rows_per_load(),
        }
    }
}

/// Live raceday window around the reference date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_days_back")]
    pub days_back: u32,

    #[serde(default = "default_days_ahead")]
    pub days_ahead: u32,
}

fn default_days_back() -> u32 {
    WindowSpec::LIVE.days_back
}

fn default_days_ahead() -> u32 {
    WindowSpec::LIVE.days_ahead
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            days_back: default_days_back(),
            days_ahead: default_days_ahead(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Fixed "today" (YYYY-MM-DD). When unset the local date is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<String>,

    #[serde(default)]
    pub leaderboard: LeaderboardConfig,

    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            reference_date: None,
            leaderboard: LeaderboardConfig::default(),
            window: WindowConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.paginator()?;

        if self.window.days_back > 1 {
            return Err(ConfigError::ValidationError(
                "window.days_back must be 0 or 1".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if let Some(date) = &self.reference_date {
            RaceDate::parse(date).map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        }

        Ok(())
    }

    /// The leaderboard paginator for these page sizes.
    pub fn paginator(&self) -> Result<Paginator, ConfigError> {
        Paginator::new(
            self.leaderboard.initial_rows,
            self.leaderboard.rows_per_load,
        )
        .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// The live raceday window.
    pub fn window_spec(&self) -> WindowSpec {
        WindowSpec::new(self.window.days_back, self.window.days_ahead)
    }

    /// Today's date for classification: the configured override, else the local date.
    pub fn resolve_reference_date(&self) -> Result<RaceDate, ConfigError> {
        match &self.reference_date {
            Some(date) => {
                RaceDate::parse(date).map_err(|e| ConfigError::ValidationError(e.to_string()))
            }
            None => Ok(RaceDate::from(Local::now().date_naive())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.leaderboard.initial_rows, 6);
        assert_eq!(config.leaderboard.rows_per_load, 10);
        assert_eq!(config.window_spec(), WindowSpec::LIVE);
        assert_eq!(config.server.port, 8080);
        assert!(config.reference_date.is_none());
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_page_sizes() {
        let mut config = AppConfig::default();
        config.leaderboard.initial_rows = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.leaderboard.rows_per_load = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_window_overlapping_past() {
        let mut config = AppConfig::default();
        config.window.days_back = 2;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_reference_date() {
        let mut config = AppConfig::default();
        config.reference_date = Some("2025-02-30".to_string());

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
            reference_date = "2025-10-25"

            [leaderboard]
            initial_rows = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.leaderboard.initial_rows, 3);
        assert_eq!(config.leaderboard.rows_per_load, 10);
        assert_eq!(
            config.resolve_reference_date().unwrap(),
            RaceDate::from_ymd(2025, 10, 25).unwrap()
        );
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
    }
}
