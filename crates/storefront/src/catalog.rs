//! Product catalog.
//!
//! The catalog is loaded once at startup and never mutated afterwards. Every
//! other component reads products from here by [`ProductId`].

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use techstore_core::{CurrencyCode, Price, ProductId};

/// Catalog shipped with the crate, used when no catalog path is configured.
const BUILTIN_CATALOG: &str = include_str!("../data/products.json");

/// Highest possible product rating.
pub const MAX_RATING: f32 = 5.0;

/// Errors that can occur when loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file is not a valid product list.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two products share an identifier.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),

    /// A rating lies outside 0.0 to 5.0.
    #[error("product {id} has rating {rating}, expected 0.0 to 5.0")]
    RatingOutOfRange { id: ProductId, rating: f32 },

    /// A price is negative.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    /// Badge text such as `"7% OFF"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    pub rating: f32,
    pub image: String,
    #[serde(default)]
    pub is_best_seller: bool,
}

impl Product {
    /// Current price in the given currency.
    #[must_use]
    pub const fn price_in(&self, currency: CurrencyCode) -> Price {
        Price::new(self.price, currency)
    }

    /// Five-character star bar, e.g. `★★★★☆` for a 4.6 rating.
    #[must_use]
    pub fn star_bar(&self) -> String {
        // Ratings are validated to 0..=5 on load.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let full = self.rating.floor().clamp(0.0, MAX_RATING) as usize;
        let mut bar = "★".repeat(full);
        bar.push_str(&"☆".repeat(5 - full));
        bar
    }
}

/// Immutable, ordered product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an ordered product list.
    ///
    /// # Errors
    ///
    /// Returns an error if two products share an id, a rating is outside
    /// 0.0 to 5.0, or a price is negative.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if !(0.0..=MAX_RATING).contains(&product.rating) {
                return Err(CatalogError::RatingOutOfRange {
                    id: product.id,
                    rating: product.rating,
                });
            }
            if product.price.is_sign_negative() && !product.price.is_zero() {
                return Err(CatalogError::NegativePrice(product.id));
            }
        }
        Ok(Self { products })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails to parse.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// The catalog bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled data is corrupt.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct brands in order of first appearance.
    #[must_use]
    pub fn brands(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.brand.as_str())
            .filter(|brand| seen.insert(*brand))
            .collect()
    }

    /// Whether any product carries this exact brand.
    #[must_use]
    pub fn has_brand(&self, brand: &str) -> bool {
        self.products.iter().any(|p| p.brand == brand)
    }
}
