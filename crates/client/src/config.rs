//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_API_URL` - Base URL of the catalog backend
//!
//! ## Optional
//! - `CATALOG_API_TOKEN` - Bearer token for authenticated calls. Absence is
//!   not an error at this layer; the backend enforces auth.

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog API client configuration.
///
/// Implements `Debug` manually to redact the bearer token.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog backend.
    pub base_url: Url,
    /// Bearer token, if the operator has one.
    pub token: Option<SecretString>,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `CATALOG_API_URL` is missing or not a valid
    /// URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_required_env("CATALOG_API_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_API_URL".to_string(), e.to_string())
            })?;
        let token = get_optional_env("CATALOG_API_TOKEN").map(SecretString::from);

        Ok(Self { base_url, token })
    }

    /// Build a configuration directly, for callers that don't use the
    /// environment (tests, embedding).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `base_url` is not a valid URL.
    pub fn new(base_url: &str, token: Option<SecretString>) -> Result<Self, ConfigError> {
        let base_url = base_url.parse::<Url>().map_err(|e| {
            ConfigError::InvalidEnvVar("base_url".to_string(), e.to_string())
        })?;
        Ok(Self { base_url, token })
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_url() {
        assert!(CatalogConfig::new("not a url", None).is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = CatalogConfig::new(
            "https://api.example.com/",
            Some(SecretString::from("tok-abc123".to_string())),
        )
        .expect("valid config");
        let debug = format!("{config:?}");
        assert!(!debug.contains("tok-abc123"));
        assert!(debug.contains("REDACTED"));
    }
}
