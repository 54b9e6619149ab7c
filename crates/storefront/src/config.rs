//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TECHNOVA_CATALOG_URL` - Product catalog endpoint (default: <https://fakestoreapi.com/products>)
//! - `TECHNOVA_DATA_DIR` - Directory holding the cart, user and order slots (default: `.technova`)
//! - `TECHNOVA_LOGOUT_ORDERS` - Orders erased on logout: `all` (default) or `user`

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::session::LogoutOrderPolicy;

/// Default catalog endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = ".technova";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Catalog API endpoint
    pub catalog_url: Url,
    /// Directory for persisted slots
    pub data_dir: PathBuf,
    /// Which orders logout erases
    pub logout_orders: LogoutOrderPolicy,
}

impl StorefrontConfig {
    /// Configuration with every variable unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a built-in default fails validation.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::from_lookup(|_| None)
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let catalog_url = match lookup("TECHNOVA_CATALOG_URL") {
            Some(raw) => parse_catalog_url(&raw)?,
            None => parse_catalog_url(DEFAULT_CATALOG_URL)?,
        };

        let data_dir = lookup("TECHNOVA_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let logout_orders = match lookup("TECHNOVA_LOGOUT_ORDERS") {
            Some(raw) => raw
                .parse::<LogoutOrderPolicy>()
                .map_err(|e| ConfigError::InvalidEnvVar("TECHNOVA_LOGOUT_ORDERS".to_string(), e))?,
            None => LogoutOrderPolicy::default(),
        };

        Ok(Self {
            catalog_url,
            data_dir,
            logout_orders,
        })
    }
}

/// Parse a catalog URL, accepting only http and https.
fn parse_catalog_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("TECHNOVA_CATALOG_URL".to_string(), msg);

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme: {other}"))),
    }
}
