//! Unified error handling.
//!
//! Provides a unified `AppError` type for everything the [`crate::state::AppState`]
//! controller can report. Form validation failures travel inside
//! [`AuthError::Validation`] and are always recoverable by correcting input.

use thiserror::Error;

use techstore_core::ProductId;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::store::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A storage tier failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Sign-in or sign-out failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// No product with this id in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// No product carries this brand.
    #[error("Unknown brand: {0}")]
    UnknownBrand(String),
}

impl AppError {
    /// Whether the user can recover by correcting their input.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownProduct(_)
                | Self::UnknownBrand(_)
                | Self::Auth(
                    AuthError::Validation(_)
                        | AuthError::SubmissionInFlight
                        | AuthError::AlreadySignedIn(_)
                )
        )
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
