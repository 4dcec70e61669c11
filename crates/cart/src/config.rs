//! Cart engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_BASE_URL` - Base URL of the catalog API serving
//!   `products/{id}` and `stock/{id}`
//!
//! ## Optional
//! - `CATALOG_API_TOKEN` - Bearer token for the catalog API
//! - `CATALOG_TIMEOUT_SECS` - Catalog request timeout (default: 10)
//! - `CART_STORAGE_PATH` - Persisted cart location (default:
//!   `rocket-shoes-cart.json`)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STORAGE_PATH: &str = "rocket-shoes-cart.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart engine configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Path of the persisted cart document
    pub storage_path: PathBuf,
}

/// Catalog API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API; always carries a trailing slash so
    /// relative paths join below it
    pub base_url: Url,
    /// Optional bearer token for the catalog API
    pub api_token: Option<SecretString>,
    /// Request timeout for catalog lookups
    pub timeout: Duration,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url.as_str())
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CartConfig {
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

        let catalog = CatalogConfig::from_env()?;
        let storage_path =
            PathBuf::from(get_env_or_default("CART_STORAGE_PATH", DEFAULT_STORAGE_PATH));

        Ok(Self {
            catalog,
            storage_path,
        })
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = parse_base_url(&get_required_env("CATALOG_BASE_URL")?)
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_BASE_URL".to_string(), e))?;
        let api_token = get_optional_env("CATALOG_API_TOKEN").map(SecretString::from);
        let timeout_secs = get_env_or_default(
            "CATALOG_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_TIMEOUT_SECS".to_string(), e.to_string()))?;

        Ok(Self {
            base_url,
            api_token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse and normalize a catalog base URL.
///
/// Requires an http(s) URL and appends a trailing slash to the path if
/// missing, so `Url::join` resolves `products/{id}` below the base path
/// instead of replacing its last segment.
fn parse_base_url(value: &str) -> Result<Url, String> {
    let mut url = Url::parse(value).map_err(|e| e.to_string())?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme: {}", url.scheme()));
    }
    if url.cannot_be_a_base() {
        return Err("URL cannot serve as a base".to_string());
    }
    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path()));
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_adds_trailing_slash() {
        let url = parse_base_url("http://localhost:3333/api/v1").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/api/v1/");
    }

    #[test]
    fn test_parse_base_url_keeps_trailing_slash() {
        let url = parse_base_url("http://localhost:3333/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/");
    }

    #[test]
    fn test_parse_base_url_join_resolves_below_base() {
        let url = parse_base_url("http://localhost:3333/api").unwrap();
        let joined = url.join("products/1").unwrap();
        assert_eq!(joined.as_str(), "http://localhost:3333/api/products/1");
    }

    #[test]
    fn test_parse_base_url_rejects_non_http_scheme() {
        let result = parse_base_url("ftp://example.com");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        let result = parse_base_url("not a url");
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_config_debug_redacts_token() {
        let config = CatalogConfig {
            base_url: Url::parse("http://localhost:3333/").unwrap(),
            api_token: Some(SecretString::from("super-secret-token")),
            timeout: Duration::from_secs(10),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("http://localhost:3333/"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-token"));
    }
}
