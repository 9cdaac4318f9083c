//! Application state controller.
//!
//! [`AppState`] exclusively owns the cart, wishlist, filters, session and UI
//! preferences. Shells read through accessors and [`AppState::snapshot`] and
//! change state only through the mutator methods here.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use techstore_core::{AuthMode, Price, ProductId, SortMode};

use crate::avatar::SeededAvatar;
use crate::cart::{Cart, CartEntry};
use crate::catalog::{Catalog, Product};
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::filter::{self, BrandFilter, FilterState, ResultSummary};
use crate::models::Session;
use crate::services::auth::{AuthForm, AuthService, PendingSignIn, SignInRequest};
use crate::store::{FileStore, MemoryStore, Storage};
use crate::wishlist::Wishlist;

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Top-level storefront state.
#[derive(Debug)]
pub struct AppState {
    config: StorefrontConfig,
    catalog: Catalog,
    filters: FilterState,
    cart: Cart,
    wishlist: Wishlist,
    auth: AuthService,
    auth_form: AuthForm,
    theme: Theme,
}

impl AppState {
    /// Create a signed-out state over the given catalog and storage.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog, storage: Storage) -> Self {
        let avatars = Box::new(SeededAvatar::new(config.avatar_base_url.clone()));
        let auth = AuthService::new(storage, avatars, config.auth_settings());

        Self {
            config,
            catalog,
            filters: FilterState::default(),
            cart: Cart::new(),
            wishlist: Wishlist::new(),
            auth,
            auth_form: AuthForm::default(),
            theme: Theme::default(),
        }
    }

    /// Load the catalog, open the storage tiers and restore any persisted
    /// session.
    ///
    /// The durable tier is a file under the configured data directory; the
    /// session tier lives in memory for the life of this state.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or the durable store cannot be loaded.
    #[instrument(skip(config))]
    pub fn open(config: StorefrontConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin()?,
        };
        let durable = FileStore::open(&config.durable_store_path())?;
        let storage = Storage::new(Box::new(durable), Box::new(MemoryStore::new()));

        let mut state = Self::new(config, catalog, storage);
        state.restore_session()?;
        Ok(state)
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn product(&self, id: ProductId) -> Result<&Product> {
        self.catalog.get(id).ok_or(AppError::UnknownProduct(id))
    }

    // =========================================================================
    // Filters
    // =========================================================================

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filters.search_text = text.into();
    }

    pub fn clear_search(&mut self) {
        self.filters.clear_search();
    }

    /// Select a brand by dropdown value (`"All"` or a catalog brand).
    ///
    /// # Errors
    ///
    /// Returns `AppError::UnknownBrand` if no product carries the brand.
    pub fn select_brand(&mut self, brand: &str) -> Result<()> {
        let selection = BrandFilter::from_option(brand);
        if let BrandFilter::Only(name) = &selection {
            if !self.catalog.has_brand(name) {
                return Err(AppError::UnknownBrand(name.clone()));
            }
        }
        self.filters.selected_brand = selection;
        Ok(())
    }

    pub const fn set_sort(&mut self, mode: SortMode) {
        self.filters.sort_mode = mode;
    }

    /// Reset search and brand, keeping the sort mode.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Products to display for the current filters.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        filter::derive(&self.catalog, &self.filters)
    }

    #[must_use]
    pub fn result_summary(&self) -> ResultSummary {
        ResultSummary::for_filters(
            self.visible_products().len(),
            self.catalog.len(),
            &self.filters,
        )
    }

    // =========================================================================
    // Cart
    // =========================================================================

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of a catalog product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::UnknownProduct` if the id is not in the catalog.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<()> {
        let product = self.catalog.get(id).ok_or(AppError::UnknownProduct(id))?;
        self.cart.add(product);
        tracing::debug!(product_id = %id, count = self.cart.count(), "Added to cart");
        Ok(())
    }

    pub fn remove_from_cart(&mut self, id: ProductId) {
        self.cart.remove(id);
        tracing::debug!(product_id = %id, "Removed from cart");
    }

    /// Set a quantity; below 1 removes the entry.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        self.cart.update_quantity(id, quantity);
        tracing::debug!(product_id = %id, quantity, "Cart quantity updated");
    }

    /// Cart total in the catalog currency.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        Price::new(self.cart.total(), self.config.currency)
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    #[must_use]
    pub const fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    /// Flip wishlist membership and return the new state.
    ///
    /// # Errors
    ///
    /// Returns `AppError::UnknownProduct` if the id is not in the catalog.
    pub fn toggle_wishlist(&mut self, id: ProductId) -> Result<bool> {
        self.product(id)?;
        let wishlisted = self.wishlist.toggle(id);
        tracing::debug!(product_id = %id, wishlisted, "Wishlist toggled");
        Ok(wishlisted)
    }

    #[must_use]
    pub fn is_wishlisted(&self, id: ProductId) -> bool {
        self.wishlist.contains(id)
    }

    // =========================================================================
    // Session
    // =========================================================================

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.auth.session()
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthService {
        &self.auth
    }

    #[must_use]
    pub const fn auth_form(&self) -> &AuthForm {
        &self.auth_form
    }

    /// Form inputs are edited in place.
    pub const fn auth_form_mut(&mut self) -> &mut AuthForm {
        &mut self.auth_form
    }

    /// Open the form in `mode`, clearing it if the mode changes.
    pub fn set_auth_mode(&mut self, mode: AuthMode) {
        self.auth_form.set_mode(mode);
    }

    /// Whether the submit control must be disabled.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.auth.is_submitting()
    }

    /// Load a persisted session, durable tier first.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage tier cannot be read.
    pub fn restore_session(&mut self) -> Result<Option<&Session>> {
        Ok(self.auth.restore()?)
    }

    /// Validate the form and start a submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the form is invalid or a submission is in flight.
    pub fn begin_sign_in(&mut self) -> Result<PendingSignIn> {
        Ok(self.auth.begin_sign_in(&mut self.auth_form)?)
    }

    /// Finish a submission started with [`Self::begin_sign_in`].
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be persisted.
    pub fn complete_sign_in(&mut self, request: &SignInRequest) -> Result<&Session> {
        Ok(self.auth.complete_sign_in(request, &mut self.auth_form)?)
    }

    /// Submit the form and wait for the simulated round trip.
    ///
    /// # Errors
    ///
    /// Returns an error if the form is invalid, a submission is in flight, or
    /// the session cannot be persisted.
    pub async fn sign_in(&mut self) -> Result<&Session> {
        Ok(self.auth.sign_in(&mut self.auth_form).await?)
    }

    /// Sign out and clear persisted session data.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage tier cannot be written.
    pub fn sign_out(&mut self) -> Result<()> {
        Ok(self.auth.sign_out()?)
    }

    // =========================================================================
    // Preferences
    // =========================================================================

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    pub const fn toggle_theme(&mut self) {
        self.theme = match self.theme {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    /// Read-only view of everything a shell renders.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        let currency = self.config.currency;
        let products = self
            .visible_products()
            .into_iter()
            .map(|product| ProductView {
                display_price: product.price_in(currency).display(),
                display_original_price: product
                    .original_price
                    .map(|p| Price::new(p, currency).display()),
                wishlisted: self.wishlist.contains(product.id),
                product,
            })
            .collect();

        Snapshot {
            products,
            summary: self.result_summary(),
            brands: self.catalog.brands(),
            filters: &self.filters,
            cart: self.cart.entries(),
            cart_count: self.cart.count(),
            cart_total: self.cart.total(),
            display_cart_total: self.cart_total().display(),
            wishlist_count: self.wishlist.len(),
            session: self.auth.session(),
            is_submitting: self.auth.is_submitting(),
            theme: self.theme,
        }
    }
}

/// A product as listed, with display fields resolved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    pub display_price: String,
    pub display_original_price: Option<String>,
    pub wishlisted: bool,
}

/// Derived values for rendering.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    pub products: Vec<ProductView<'a>>,
    pub summary: ResultSummary,
    pub brands: Vec<&'a str>,
    pub filters: &'a FilterState,
    pub cart: &'a [CartEntry],
    pub cart_count: u64,
    pub cart_total: Decimal,
    pub display_cart_total: String,
    pub wishlist_count: usize,
    pub session: Option<&'a Session>,
    pub is_submitting: bool,
    pub theme: Theme,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::catalog::tests::product;
    use crate::services::auth::{AuthError, FormField};

    fn state() -> AppState {
        let mut config = StorefrontConfig::from_lookup(|_| None).unwrap();
        config.login_delay = Duration::from_millis(1500);
        let catalog = Catalog::new(vec![
            product(1, "TechPhone", "Acme", 24_999, 4.5),
            product(2, "Laptop", "Globex", 129_999, 4.8),
            product(3, "Earbuds", "Acme", 2_999, 4.1),
        ])
        .unwrap();
        AppState::new(config, catalog, Storage::in_memory())
    }

    #[test]
    fn test_cart_through_controller() {
        let mut state = state();
        state.add_to_cart(ProductId::new(2)).unwrap();
        state.add_to_cart(ProductId::new(2)).unwrap();
        state.add_to_cart(ProductId::new(3)).unwrap();

        assert_eq!(state.cart().count(), 3);
        assert_eq!(state.cart_total().display(), "₹2,62,997");

        state.update_quantity(ProductId::new(2), 0);
        assert_eq!(state.cart().count(), 1);

        assert!(matches!(
            state.add_to_cart(ProductId::new(9)),
            Err(AppError::UnknownProduct(_))
        ));
    }

    #[test]
    fn test_filters_through_controller() {
        let mut state = state();
        state.select_brand("Acme").unwrap();
        state.set_sort(SortMode::PriceAscending);
        let ids: Vec<u32> = state.visible_products().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, [3, 1]);
        assert_eq!(
            state.result_summary().to_string(),
            "Showing 2 of 3 products in Acme"
        );

        assert!(matches!(
            state.select_brand("Nokia"),
            Err(AppError::UnknownBrand(_))
        ));

        state.set_search("zzz");
        assert!(state.result_summary().is_empty());
        assert_eq!(
            state.result_summary().to_string(),
            "Showing 0 of 3 products for \"zzz\" in Acme"
        );
        state.clear_filters();
        assert_eq!(state.result_summary().shown, 3);
        assert_eq!(state.filters().sort_mode, SortMode::PriceAscending);
    }

    #[test]
    fn test_wishlist_through_controller() {
        let mut state = state();
        assert!(state.toggle_wishlist(ProductId::new(1)).unwrap());
        assert!(state.is_wishlisted(ProductId::new(1)));
        assert!(!state.toggle_wishlist(ProductId::new(1)).unwrap());
        assert!(state.toggle_wishlist(ProductId::new(7)).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sign_in_and_out() {
        let mut state = state();
        let form = state.auth_form_mut();
        form.set_field(FormField::Username, "jane@x.com");
        form.set_field(FormField::Password, "secret1");

        let pending = state.begin_sign_in().unwrap();
        assert!(state.is_submitting());
        assert!(state.snapshot().is_submitting);
        assert!(matches!(
            state.begin_sign_in(),
            Err(AppError::Auth(AuthError::SubmissionInFlight))
        ));

        let request = pending.resolve().await.unwrap();
        let session = state.complete_sign_in(&request).unwrap();
        assert_eq!(session.first_name(), "jane");
        assert!(!state.is_submitting());

        state.sign_out().unwrap();
        assert!(state.session().is_none());
    }

    #[test]
    fn test_snapshot() {
        let mut state = state();
        state.add_to_cart(ProductId::new(1)).unwrap();
        state.toggle_wishlist(ProductId::new(2)).unwrap();
        state.toggle_theme();

        let snapshot = state.snapshot();
        assert_eq!(snapshot.products.len(), 3);
        assert_eq!(snapshot.cart_count, 1);
        assert_eq!(snapshot.display_cart_total, "₹24,999");
        assert_eq!(snapshot.wishlist_count, 1);
        assert_eq!(snapshot.brands, vec!["Acme", "Globex"]);
        assert_eq!(snapshot.theme, Theme::Light);
        assert!(snapshot.session.is_none());

        let laptop = snapshot.products.iter().find(|p| p.product.id.get() == 2).unwrap();
        assert!(laptop.wishlisted);
        assert_eq!(laptop.display_price, "₹1,29,999");

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["cartCount"], 1);
        assert_eq!(json["products"][0]["displayPrice"], "₹24,999");
    }
}
