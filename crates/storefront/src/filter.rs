//! Search, brand filter and sort over the catalog.
//!
//! [`derive`] is a pure function of the catalog and a [`FilterState`]; the
//! catalog itself is never reordered.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use techstore_core::SortMode;

use crate::catalog::{Catalog, Product};

/// Brand selection in the filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BrandFilter {
    /// No brand restriction.
    #[default]
    All,
    /// Exactly this brand (case-sensitive).
    Only(String),
}

impl BrandFilter {
    /// Sentinel option value meaning "all brands".
    pub const ALL: &'static str = "All";

    /// Parse a dropdown option value.
    #[must_use]
    pub fn from_option(value: &str) -> Self {
        if value == Self::ALL {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    /// Option value for this selection.
    #[must_use]
    pub fn as_option(&self) -> &str {
        match self {
            Self::All => Self::ALL,
            Self::Only(brand) => brand,
        }
    }

    fn matches(&self, brand: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == brand,
        }
    }
}

/// Current search, brand and sort selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub search_text: String,
    pub selected_brand: BrandFilter,
    pub sort_mode: SortMode,
}

impl FilterState {
    /// Reset search text and brand. The sort mode is kept.
    pub fn clear(&mut self) {
        self.search_text.clear();
        self.selected_brand = BrandFilter::All;
    }

    /// Empty the search box only.
    pub fn clear_search(&mut self) {
        self.search_text.clear();
    }

    /// Whether search text or a brand restriction is active.
    #[must_use]
    pub fn is_filtering(&self) -> bool {
        !self.search_text.is_empty() || self.selected_brand != BrandFilter::All
    }

    fn matches(&self, needle: &str, product: &Product) -> bool {
        let matches_search = needle.is_empty()
            || product.name.to_lowercase().contains(needle)
            || product.brand.to_lowercase().contains(needle);
        matches_search && self.selected_brand.matches(&product.brand)
    }
}

/// Products to display for the given filter state.
///
/// A product matches when its name or brand contains the search text
/// (case-insensitive) and its brand passes the brand filter. Sorting is
/// stable, so equal keys keep catalog order.
#[must_use]
pub fn derive<'a>(catalog: &'a Catalog, state: &FilterState) -> Vec<&'a Product> {
    let needle = state.search_text.to_lowercase();
    let mut matched: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| state.matches(&needle, p))
        .collect();

    if let Some(order) = comparator(state.sort_mode) {
        matched.sort_by(|a, b| order(a, b));
    }

    matched
}

/// Ordering for a sort mode, or `None` to keep catalog order.
fn comparator(mode: SortMode) -> Option<fn(&Product, &Product) -> Ordering> {
    match mode {
        SortMode::None => None,
        SortMode::PriceAscending => Some(|a, b| a.price.cmp(&b.price)),
        SortMode::PriceDescending => Some(|a, b| b.price.cmp(&a.price)),
        SortMode::RatingDescending => Some(|a, b| b.rating.total_cmp(&a.rating)),
    }
}

/// Result count line, e.g. `Showing 2 of 10 products for "pro" in Apple`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub shown: usize,
    pub total: usize,
    /// Search text, when any was entered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Selected brand, unless all brands are shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl ResultSummary {
    /// Counts with no active filters.
    #[must_use]
    pub const fn new(shown: usize, total: usize) -> Self {
        Self {
            shown,
            total,
            search: None,
            brand: None,
        }
    }

    /// Counts qualified by the active search text and brand.
    #[must_use]
    pub fn for_filters(shown: usize, total: usize, state: &FilterState) -> Self {
        if !state.is_filtering() {
            return Self::new(shown, total);
        }
        Self {
            shown,
            total,
            search: (!state.search_text.is_empty()).then(|| state.search_text.clone()),
            brand: match &state.selected_brand {
                BrandFilter::All => None,
                BrandFilter::Only(brand) => Some(brand.clone()),
            },
        }
    }

    /// Whether the filters hide every product.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.shown == 0
    }
}

impl std::fmt::Display for ResultSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Showing {} of {} products", self.shown, self.total)?;
        if let Some(search) = &self.search {
            write!(f, " for \"{search}\"")?;
        }
        if let Some(brand) = &self.brand {
            write!(f, " in {brand}")?;
        }
        Ok(())
    }
}
