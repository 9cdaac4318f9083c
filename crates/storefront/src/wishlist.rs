//! Wishlist membership.

use serde::{Deserialize, Serialize};

use techstore_core::ProductId;

/// Wishlisted products in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    items: Vec<ProductId>,
}

impl Wishlist {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership and return the new state.
    ///
    /// Removing keeps the relative order of the rest; re-adding appends.
    pub fn toggle(&mut self, product_id: ProductId) -> bool {
        match self.items.iter().position(|id| *id == product_id) {
            Some(index) => {
                self.items.remove(index);
                false
            }
            None => {
                self.items.push(product_id);
                true
            }
        }
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.contains(&product_id)
    }

    /// Badge count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Wishlisted ids, oldest first.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut wishlist = Wishlist::new();
        let id = ProductId::new(4);

        assert!(wishlist.toggle(id));
        assert!(wishlist.contains(id));
        assert_eq!(wishlist.len(), 1);

        assert!(!wishlist.toggle(id));
        assert!(!wishlist.contains(id));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_double_toggle_restores_state() {
        let mut wishlist = Wishlist::new();
        wishlist.toggle(ProductId::new(1));
        let before = wishlist.clone();

        wishlist.toggle(ProductId::new(2));
        wishlist.toggle(ProductId::new(2));
        assert_eq!(wishlist, before);

        wishlist.toggle(ProductId::new(1));
        wishlist.toggle(ProductId::new(1));
        assert_eq!(wishlist, before);
    }

    #[test]
    fn test_ids_keep_insertion_order() {
        let mut wishlist = Wishlist::new();
        for id in [9, 3, 7] {
            wishlist.toggle(ProductId::new(id));
        }
        assert_eq!(
            wishlist.ids(),
            [ProductId::new(9), ProductId::new(3), ProductId::new(7)]
        );

        // Removing from the middle keeps the others in place; re-adding appends.
        wishlist.toggle(ProductId::new(3));
        wishlist.toggle(ProductId::new(3));
        assert_eq!(
            wishlist.ids(),
            [ProductId::new(9), ProductId::new(7), ProductId::new(3)]
        );
    }

    #[test]
    fn test_serializes_as_ordered_array() {
        let mut wishlist = Wishlist::new();
        wishlist.toggle(ProductId::new(5));
        wishlist.toggle(ProductId::new(2));
        assert_eq!(serde_json::to_string(&wishlist).unwrap(), "[5,2]");
    }
}
