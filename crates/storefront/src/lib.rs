//! TechStore storefront state library.
//!
//! Owns the product catalog, catalog filters, cart, wishlist and the mock
//! sign-in session, persisting the session across durable and
//! session-scoped key-value stores. Shells drive everything through
//! [`state::AppState`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod avatar;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod wishlist;
