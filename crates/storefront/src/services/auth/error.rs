//! Authentication error types.

use thiserror::Error;

use crate::store::StoreError;

use super::form::FieldErrors;

/// Errors that can occur during sign-in and sign-out.
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more form fields are invalid. The messages are also stored on
    /// the form.
    #[error("{} form field(s) failed validation", .0.len())]
    Validation(FieldErrors),

    /// Someone is signed in; they must sign out before another sign-in.
    #[error("already signed in as {0}; sign out first")]
    AlreadySignedIn(String),

    /// A submission is already waiting on its round trip.
    #[error("a sign-in is already in progress")]
    SubmissionInFlight,

    /// Reading or writing a storage tier failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// The session record could not be encoded.
    #[error("session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
