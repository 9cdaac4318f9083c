//! Core types for TechStore.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod handle;
pub mod id;
pub mod mode;
pub mod price;

pub use email::{Email, EmailError};
pub use handle::{Handle, HandleError};
pub use id::*;
pub use mode::*;
pub use price::{CurrencyCode, Price};
