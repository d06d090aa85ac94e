//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `EASYPOST_API_KEY` - EasyPost API key (Basic auth username, empty password)
//!
//! ## Optional
//! - `EASYPOST_BASE_URL` - Rate API base URL (default: `https://api.easypost.com/v2`)
//! - `DATABASE_URL` - `PostgreSQL` connection string for the booking store
//!
//! A `.env` file in the working directory is honored for local development.
//! Configuration loading fails fast: a missing or empty API key is reported
//! before any network call is attempted.

use secrecy::SecretString;
use thiserror::Error;

/// Default EasyPost API base URL.
pub const DEFAULT_EASYPOST_BASE_URL: &str = "https://api.easypost.com/v2";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Application configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct ShipperConfig {
    /// EasyPost API key.
    pub easypost_api_key: SecretString,
    /// EasyPost API base URL.
    pub easypost_base_url: String,
    /// `PostgreSQL` connection string, when a database-backed store is in use.
    pub database_url: Option<SecretString>,
}

impl std::fmt::Debug for ShipperConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShipperConfig")
            .field("easypost_api_key", &"[REDACTED]")
            .field("easypost_base_url", &self.easypost_base_url)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl ShipperConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `EASYPOST_API_KEY` is unset
    /// or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let easypost_api_key = get_required_secret("EASYPOST_API_KEY")?;
        let easypost_base_url =
            get_env_or_default("EASYPOST_BASE_URL", DEFAULT_EASYPOST_BASE_URL);
        let database_url = get_optional_env("DATABASE_URL").map(SecretString::from);

        Ok(Self {
            easypost_api_key,
            easypost_base_url,
            database_url,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable. An empty value counts as missing.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar(key.to_owned())),
    }
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ShipperConfig {
            easypost_api_key: SecretString::from("EZAK_super_secret"),
            easypost_base_url: DEFAULT_EASYPOST_BASE_URL.to_owned(),
            database_url: Some(SecretString::from("postgres://user:pw@localhost/bs")),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("EZAK_super_secret"));
        assert!(!debug_output.contains("user:pw"));
        assert!(debug_output.contains(DEFAULT_EASYPOST_BASE_URL));
    }

    #[test]
    fn test_missing_env_var_display() {
        let err = ConfigError::MissingEnvVar("EASYPOST_API_KEY".to_owned());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: EASYPOST_API_KEY"
        );
    }
}
