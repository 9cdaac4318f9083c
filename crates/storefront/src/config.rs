//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `TECHSTORE_STORE_DOMAIN` - Domain for synthesized handle-login emails (default: techstore.com)
//! - `TECHSTORE_LOGIN_DELAY_MS` - Simulated sign-in round trip in milliseconds (default: 1500)
//! - `TECHSTORE_AVATAR_BASE_URL` - Avatar generator endpoint (default: DiceBear avataaars)
//! - `TECHSTORE_CATALOG_PATH` - Product catalog JSON file (default: built-in catalog)
//! - `TECHSTORE_DATA_DIR` - Directory holding the durable store (default: .techstore)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use techstore_core::CurrencyCode;

use crate::services::auth::AuthSettings;

const DEFAULT_STORE_DOMAIN: &str = "techstore.com";
const DEFAULT_LOGIN_DELAY_MS: &str = "1500";
const DEFAULT_AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg";
const DEFAULT_DATA_DIR: &str = ".techstore";

/// File name of the durable store inside the data directory.
const DURABLE_STORE_FILE: &str = "durable.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Domain appended to handles when a login has no email
    pub store_domain: String,
    /// Simulated sign-in round trip
    pub login_delay: Duration,
    /// Avatar generator endpoint
    pub avatar_base_url: Url,
    /// Catalog JSON file; `None` uses the built-in catalog
    pub catalog_path: Option<PathBuf>,
    /// Directory holding the durable store
    pub data_dir: PathBuf,
    /// Currency catalog prices are expressed in
    pub currency: CurrencyCode,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let store_domain = env.or_default("TECHSTORE_STORE_DOMAIN", DEFAULT_STORE_DOMAIN);
        if store_domain.trim().is_empty() || store_domain.contains('@') {
            return Err(ConfigError::InvalidEnvVar(
                "TECHSTORE_STORE_DOMAIN".to_string(),
                format!("not a domain: {store_domain:?}"),
            ));
        }

        let login_delay = env
            .or_default("TECHSTORE_LOGIN_DELAY_MS", DEFAULT_LOGIN_DELAY_MS)
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("TECHSTORE_LOGIN_DELAY_MS".to_string(), e.to_string())
            })?;

        let avatar_base_url = Url::parse(
            &env.or_default("TECHSTORE_AVATAR_BASE_URL", DEFAULT_AVATAR_BASE_URL),
        )
        .map_err(|e| {
            ConfigError::InvalidEnvVar("TECHSTORE_AVATAR_BASE_URL".to_string(), e.to_string())
        })?;

        let catalog_path = env.optional("TECHSTORE_CATALOG_PATH").map(PathBuf::from);
        let data_dir = PathBuf::from(env.or_default("TECHSTORE_DATA_DIR", DEFAULT_DATA_DIR));

        Ok(Self {
            store_domain,
            login_delay,
            avatar_base_url,
            catalog_path,
            data_dir,
            currency: CurrencyCode::INR,
        })
    }

    /// Path of the durable store file.
    #[must_use]
    pub fn durable_store_path(&self) -> PathBuf {
        self.data_dir.join(DURABLE_STORE_FILE)
    }

    /// Settings for the authentication service.
    #[must_use]
    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings {
            store_domain: self.store_domain.clone(),
            login_delay: self.login_delay,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable, treating empty values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}
