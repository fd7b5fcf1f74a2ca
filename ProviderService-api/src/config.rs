//! Process configuration read from the environment.
//!
//! `dotenv` is applied by the binary before [`AppConfig::from_env`] runs, so a
//! `.env` file and real environment variables feed the same lookup.

use std::str::FromStr;

use provider_service_data::database::{DatabaseConfig, DatabaseError};
use thiserror::Error;
use tracing::debug;

/// Configuration errors that abort startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 1 and 65535, got '{0}'")]
    InvalidPort(String),

    #[error("LOG_FORMAT must be 'pretty' or 'json', got '{0}'")]
    InvalidLogFormat(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Log output format
    pub log_format: LogFormat,
    /// Storage settings
    pub database: DatabaseConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_format: LogFormat::Pretty,
            database: DatabaseConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(value) => match value.trim().parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(ConfigError::InvalidPort(value)),
            },
            None => defaults.port,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => defaults.log_format,
        };

        let database = DatabaseConfig::from_lookup(&lookup)?;

        let config = Self {
            host,
            port,
            log_format,
            database,
        };
        debug!(?config, "Application configuration loaded");
        Ok(config)
    }
}
