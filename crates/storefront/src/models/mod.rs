//! Domain models.
//!
//! Types stored through the key-value tiers.

pub mod session;

pub use session::{Session, SessionState};
