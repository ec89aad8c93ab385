//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `AGROLINK_API_BASE_URL` - Base URL of the auth/order backend
//!
//! ## Optional
//! - `AGROLINK_REQUEST_TIMEOUT_SECS` - HTTP request timeout (default: 10)
//! - `AGROLINK_STATE_PATH` - Path of the durable state file
//!   (default: `agrolink_state.json` in the working directory)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default HTTP request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default durable state file name.
const DEFAULT_STATE_PATH: &str = "agrolink_state.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend hosting the auth and order endpoints.
    pub api_base_url: Url,
    /// Timeout applied to every outgoing HTTP request.
    pub request_timeout: Duration,
    /// Path of the durable key-value state file.
    pub state_path: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = required("AGROLINK_API_BASE_URL")?;
        let api_base_url = Url::parse(&api_base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("AGROLINK_API_BASE_URL".to_owned(), e.to_string())
        })?;

        let request_timeout_secs = match std::env::var("AGROLINK_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("AGROLINK_REQUEST_TIMEOUT_SECS".to_owned(), e.to_string())
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let state_path = std::env::var("AGROLINK_STATE_PATH")
            .map_or_else(|_| PathBuf::from(DEFAULT_STATE_PATH), PathBuf::from);

        Ok(Self {
            api_base_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
            state_path,
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}
