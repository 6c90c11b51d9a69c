//! Application configuration structs
//!
//! Loads configuration from environment variables (with optional .env file).

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub storage: StorageConfig,
    pub latency: LatencyConfig,
    pub snowflake: SnowflakeConfig,
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

/// Collection storage configuration
///
/// `data_dir = None` keeps every collection in memory only, which is what
/// the test fixtures use.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    pub data_dir: Option<PathBuf>,
}

/// Simulated network latency applied to every service operation
#[derive(Debug, Clone, Deserialize)]
pub struct LatencyConfig {
    #[serde(default = "default_latency_ms")]
    pub millis: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            millis: default_latency_ms(),
        }
    }
}

/// Snowflake id generator configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "market-server".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_latency_ms() -> u64 {
    500
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is present but unparseable
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
            storage: StorageConfig {
                data_dir: env::var("DATA_DIR").ok().map(PathBuf::from),
            },
            latency: LatencyConfig {
                millis: match env::var("SIMULATED_LATENCY_MS") {
                    Ok(raw) => raw
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SIMULATED_LATENCY_MS", raw))?,
                    Err(_) => default_latency_ms(),
                },
            },
            snowflake: SnowflakeConfig {
                worker_id: match env::var("WORKER_ID") {
                    Ok(raw) => raw
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("WORKER_ID", raw))?,
                    Err(_) => 0,
                },
            },
        })
    }

    /// In-memory configuration with zero latency, used by tests
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::Development,
            },
            storage: StorageConfig { data_dir: None },
            latency: LatencyConfig { millis: 0 },
            snowflake: SnowflakeConfig { worker_id: 0 },
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
