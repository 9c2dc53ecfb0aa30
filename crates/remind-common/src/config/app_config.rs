//! Application configuration structs
//!
//! Loads configuration from environment variables (with optional .env file).

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub scheduler: SchedulerConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Scheduler and sweep configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Period of the poll expiry sweep, in seconds
    #[serde(default = "default_expiry_sweep_seconds")]
    pub expiry_sweep_seconds: u64,
    /// Period of the missed-reminder sweep, in seconds
    #[serde(default = "default_missed_sweep_seconds")]
    pub missed_sweep_seconds: u64,
    /// How far back the missed-reminder sweep looks, in minutes
    #[serde(default = "default_missed_grace_minutes")]
    pub missed_grace_minutes: i64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            expiry_sweep_seconds: default_expiry_sweep_seconds(),
            missed_sweep_seconds: default_missed_sweep_seconds(),
            missed_grace_minutes: default_missed_grace_minutes(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "remind-server".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_expiry_sweep_seconds() -> u64 {
    60
}

fn default_missed_sweep_seconds() -> u64 {
    60
}

fn default_missed_grace_minutes() -> i64 {
    5
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            scheduler: SchedulerConfig {
                expiry_sweep_seconds: env::var("EXPIRY_SWEEP_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_expiry_sweep_seconds),
                missed_sweep_seconds: env::var("MISSED_SWEEP_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_missed_sweep_seconds),
                missed_grace_minutes: env::var("MISSED_GRACE_MINUTES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_missed_grace_minutes),
            },
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}
