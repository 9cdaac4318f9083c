//! TechStore Core - Shared types library.
//!
//! This crate provides common types used across all TechStore components:
//! - `storefront` - Catalog, cart, wishlist and session state engine
//! - `cli` - Text-mode shell over the storefront engine
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no clocks. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, handles and modes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
