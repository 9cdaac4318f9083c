//! Cart and wishlist invariants across sequences of user actions.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use techstore_core::ProductId;
use techstore_integration_tests::TestContext;
use techstore_storefront::state::AppState;

fn assert_totals_consistent(state: &AppState) {
    let cart = state.cart();
    let count: u64 = cart.entries().iter().map(|e| u64::from(e.quantity)).sum();
    let total: Decimal = cart.entries().iter().map(|e| e.price * Decimal::from(e.quantity)).sum();
    assert_eq!(cart.count(), count);
    assert_eq!(cart.total(), total);
    assert!(cart.entries().iter().all(|e| e.quantity >= 1));
}

#[test]
fn test_cart_sequence() {
    let ctx = TestContext::new();
    let mut state = ctx.open().unwrap();
    let iphone = ProductId::new(1);
    let buds = ProductId::new(9);

    state.add_to_cart(iphone).unwrap();
    state.add_to_cart(iphone).unwrap();
    state.add_to_cart(buds).unwrap();
    assert_eq!(state.cart().entries().len(), 2);
    assert_totals_consistent(&state);

    state.update_quantity(buds, 5);
    assert_eq!(state.cart().count(), 7);
    assert_eq!(state.cart_total().display(), "₹2,74,993");
    assert_totals_consistent(&state);

    state.update_quantity(iphone, -3);
    assert!(state.cart().get(iphone).is_none());
    assert_totals_consistent(&state);

    state.remove_from_cart(buds);
    assert!(state.cart().is_empty());
    assert_eq!(state.cart().total(), Decimal::ZERO);
    assert_eq!(state.cart_total().display(), "₹0");
}

#[test]
fn test_cart_keeps_first_seen_order() {
    let ctx = TestContext::new();
    let mut state = ctx.open().unwrap();

    for id in [5, 2, 5, 8, 2] {
        state.add_to_cart(ProductId::new(id)).unwrap();
    }
    let order: Vec<u32> = state
        .cart()
        .entries()
        .iter()
        .map(|e| e.product_id.get())
        .collect();
    assert_eq!(order, [5, 2, 8]);
}

#[test]
fn test_update_of_absent_entry_is_ignored() {
    let ctx = TestContext::new();
    let mut state = ctx.open().unwrap();

    state.update_quantity(ProductId::new(3), 4);
    state.remove_from_cart(ProductId::new(3));
    assert!(state.cart().is_empty());
}

#[test]
fn test_cart_and_wishlist_are_independent() {
    let ctx = TestContext::new();
    let mut state = ctx.open().unwrap();
    let tv = ProductId::new(8);

    assert!(state.toggle_wishlist(tv).unwrap());
    state.add_to_cart(tv).unwrap();
    assert!(!state.toggle_wishlist(tv).unwrap());

    assert_eq!(state.cart().count(), 1);
    assert!(state.wishlist().is_empty());
    assert!(!state.snapshot().products.iter().any(|p| p.wishlisted));
}
