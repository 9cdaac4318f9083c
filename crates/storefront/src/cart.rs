//! Shopping cart.
//!
//! Entries snapshot the product's name, brand, image and price when first
//! added, so later catalog changes never alter what is already in the cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use techstore_core::ProductId;

use crate::catalog::Product;

/// One product line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub product_id: ProductId,
    pub name: String,
    pub brand: String,
    pub image: String,
    /// Unit price at the time the product was added.
    pub price: Decimal,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartEntry {
    fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            brand: product.brand.clone(),
            image: product.image.clone(),
            price: product.price,
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Cart entries in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing entry, or creates one with quantity 1.
    pub fn add(&mut self, product: &Product) {
        match self.entry_mut(product.id) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(1),
            None => self.entries.push(CartEntry::from_product(product)),
        }
    }

    /// Remove a product's entry. Absent products are ignored.
    pub fn remove(&mut self, product_id: ProductId) {
        self.entries.retain(|e| e.product_id != product_id);
    }

    /// Set a product's quantity.
    ///
    /// Quantities below 1 remove the entry. Products not in the cart are
    /// ignored.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity < 1 {
            self.remove(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(entry) = self.entry_mut(product_id) {
            entry.quantity = quantity;
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entry for a product, if present.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.product_id == product_id)
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of units across all entries.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }

    /// Sum of unit price times quantity. Exact; never rounded.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    fn entry_mut(&mut self, product_id: ProductId) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|e| e.product_id == product_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::tests::product;

    #[test]
    fn test_add_twice_merges_entry() {
        let phone = product(1, "TechPhone", "Acme", 24_999, 4.5);
        let mut cart = Cart::new();
        cart.add(&phone);
        cart.add(&phone);

        assert_eq!(cart.entries().len(), 1);
        assert_eq!(cart.get(phone.id).unwrap().quantity, 2);
        assert_eq!(cart.count(), 2);
        assert_eq!(cart.total(), phone.price * Decimal::from(2));
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&product(2, "B", "X", 20, 4.0));
        cart.add(&product(1, "A", "X", 10, 4.0));
        cart.add(&product(2, "B", "X", 20, 4.0));

        let ids: Vec<u32> = cart.entries().iter().map(|e| e.product_id.get()).collect();
        assert_eq!(ids, [2, 1]);
    }

    #[test]
    fn test_price_is_snapshotted() {
        let mut phone = product(1, "TechPhone", "Acme", 500, 4.5);
        let mut cart = Cart::new();
        cart.add(&phone);

        phone.price = Decimal::new(900, 0);
        cart.add(&phone);

        let entry = cart.get(phone.id).unwrap();
        assert_eq!(entry.price, Decimal::new(500, 0));
        assert_eq!(cart.total(), Decimal::new(1000, 0));
    }

    #[test]
    fn test_update_quantity_is_absolute() {
        let phone = product(1, "TechPhone", "Acme", 100, 4.5);
        let mut cart = Cart::new();
        cart.add(&phone);
        cart.update_quantity(phone.id, 5);

        assert_eq!(cart.count(), 5);
        assert_eq!(cart.total(), Decimal::new(500, 0));
    }

    #[test]
    fn test_update_quantity_below_one_removes() {
        let phone = product(1, "TechPhone", "Acme", 100, 4.5);
        let mut cart = Cart::new();
        cart.add(&phone);
        cart.update_quantity(phone.id, 0);
        assert!(cart.is_empty());

        // Removing an absent entry is a no-op.
        cart.remove(phone.id);
        assert!(cart.is_empty());

        cart.add(&phone);
        cart.update_quantity(phone.id, -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product(1, "A", "X", 10, 4.0));
        cart.update_quantity(ProductId::new(99), 4);
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_total_is_exact_decimal() {
        let mut cart = Cart::new();
        let mut item = product(1, "Cable", "X", 0, 4.0);
        item.price = Decimal::new(1999, 2);
        cart.add(&item);
        cart.update_quantity(item.id, 3);
        assert_eq!(cart.total(), Decimal::new(5997, 2));
    }
}
