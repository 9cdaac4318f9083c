//! Integration tests for the TechStore storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p techstore-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_session` - Sign-in persistence across restarts
//! - `storefront_catalog` - Catalog loading, filtering and sorting
//! - `storefront_cart` - Cart and wishlist invariants
//!
//! Each test gets its own data directory through [`TestContext`], so the
//! durable store never leaks between tests.

use std::path::PathBuf;

use tempfile::TempDir;

use techstore_storefront::config::StorefrontConfig;
use techstore_storefront::error::AppError;
use techstore_storefront::state::AppState;

/// A scratch data directory and the configuration pointing at it.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create a context with an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Configuration using this context's data directory.
    ///
    /// # Panics
    ///
    /// Panics if a variable in `vars` is invalid.
    #[must_use]
    pub fn config_with(&self, vars: &[(&str, &str)]) -> StorefrontConfig {
        let data_dir = self.dir.path().display().to_string();
        StorefrontConfig::from_lookup(|key| {
            if key == "TECHSTORE_DATA_DIR" {
                return Some(data_dir.clone());
            }
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        })
        .expect("Invalid test configuration")
    }

    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        self.config_with(&[])
    }

    /// Open the storefront as a fresh process would.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or durable store cannot be loaded.
    pub fn open(&self) -> Result<AppState, AppError> {
        AppState::open(self.config())
    }

    /// Path of a file inside the data directory.
    #[must_use]
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Raw durable store contents, or `Null` if nothing has been written.
    ///
    /// # Panics
    ///
    /// Panics if the store file exists but is not JSON.
    #[must_use]
    pub fn durable_contents(&self) -> serde_json::Value {
        match std::fs::read_to_string(self.config().durable_store_path()) {
            Ok(json) => serde_json::from_str(&json).expect("Durable store is not JSON"),
            Err(_) => serde_json::Value::Null,
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
