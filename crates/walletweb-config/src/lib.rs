//! Configuration management for walletweb
//!
//! This module handles loading, validation, and management of
//! walletweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

/// Environment variable overriding the remote API base URL
pub const API_URL_ENV: &str = "WALLETWEB_API_URL";

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

/// Remote transaction API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the transaction API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Wallet all transactions are recorded against
    #[serde(default = "default_wallet_id")]
    pub wallet_id: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            wallet_id: default_wallet_id(),
        }
    }
}

fn default_base_url() -> String {
    "https://wallet-transactions-production-fe3f.up.railway.app/api".to_string()
}

fn default_wallet_id() -> u64 {
    1
}

/// Dashboard display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Transactions per page
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    /// How long a just-created transaction stays pinned to the top of the
    /// table before the server list is trusted again, in milliseconds
    #[serde(default = "default_optimistic_hold_ms")]
    pub optimistic_hold_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            optimistic_hold_ms: default_optimistic_hold_ms(),
        }
    }
}

fn default_per_page() -> usize {
    10
}

fn default_optimistic_hold_ms() -> u64 {
    500
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// A missing file yields the defaults so the dashboard can run without
    /// any local setup. The `WALLETWEB_API_URL` environment variable, when
    /// set, overrides the configured API base URL.
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|_| ConfigError::IoError)?;
            serde_yaml::from_str::<Config>(&content)
                .map_err(|_| ConfigError::InvalidYaml)?
        } else {
            Config::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.is_empty() {
                config.api.base_url = url;
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.api.base_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: "API base URL must not be empty".to_string(),
            });
        }

        if self.dashboard.per_page == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.per_page".to_string(),
                reason: "Page size must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
