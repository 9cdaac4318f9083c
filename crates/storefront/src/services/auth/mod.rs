//! Authentication service.
//!
//! Mock sign-in: there is no account store and no credential check. A valid
//! form always succeeds after a fixed artificial delay that stands in for a
//! network round trip. The resulting session is persisted in the durable or
//! session-scoped tier depending on the remember choice.
//!
//! # Submission lifecycle
//!
//! 1. [`AuthService::begin_sign_in`] validates the form and raises the
//!    in-flight flag. A second call while the flag is up is rejected.
//! 2. [`PendingSignIn::resolve`] waits out the delay.
//! 3. [`AuthService::complete_sign_in`] builds and persists the session,
//!    lowers the flag and resets the form.
//!
//! [`AuthService::sign_in`] runs all three in sequence.

mod error;
pub mod form;

pub use error::AuthError;
pub use form::{AuthForm, FieldErrors, FormField, SignInRequest};

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::instrument;

use techstore_core::{AuthMode, Email, UserId};

use crate::avatar::AvatarGenerator;
use crate::models::{Session, SessionState};
use crate::store::{Storage, keys};

/// Settings for the mock sign-in.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Domain used to synthesize an email for handle logins.
    pub store_domain: String,
    /// Simulated round-trip time.
    pub login_delay: Duration,
}

/// A validated submission waiting on its simulated round trip.
#[derive(Debug)]
#[must_use = "a pending sign-in keeps the submit guard raised until completed"]
pub struct PendingSignIn {
    request: SignInRequest,
    delay: Duration,
}

impl PendingSignIn {
    /// Wait out the simulated round trip.
    ///
    /// # Errors
    ///
    /// The mock round trip itself never fails; the `Result` is the seam a
    /// real backend would report through.
    pub async fn resolve(self) -> Result<SignInRequest, AuthError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.request)
    }

    /// The inputs being submitted.
    #[must_use]
    pub const fn request(&self) -> &SignInRequest {
        &self.request
    }
}

/// Session manager.
///
/// Owns the signed-in state, the storage tiers and the submit guard.
pub struct AuthService {
    storage: Storage,
    avatars: Box<dyn AvatarGenerator>,
    settings: AuthSettings,
    session: Option<Session>,
    in_flight: bool,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("settings", &self.settings)
            .field("session", &self.session)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Create a signed-out service.
    #[must_use]
    pub fn new(storage: Storage, avatars: Box<dyn AvatarGenerator>, settings: AuthSettings) -> Self {
        Self {
            storage,
            avatars,
            settings,
            session: None,
            in_flight: false,
        }
    }

    #[must_use]
    pub const fn state(&self) -> SessionState<'_> {
        match &self.session {
            Some(session) => SessionState::SignedIn(session),
            None => SessionState::SignedOut,
        }
    }

    /// The signed-in session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Whether a submission is waiting on its round trip.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.in_flight
    }

    #[must_use]
    pub const fn storage(&self) -> &Storage {
        &self.storage
    }

    // =========================================================================
    // Restore
    // =========================================================================

    /// Load a persisted session at startup.
    ///
    /// Checks the durable tier first, then the session-scoped tier. A record
    /// that cannot be decoded is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if a tier cannot be read.
    #[instrument(skip(self))]
    pub fn restore(&mut self) -> Result<Option<&Session>, AuthError> {
        let tiers = [
            ("durable", self.storage.durable().get(keys::USER)?),
            ("session", self.storage.session().get(keys::USER)?),
        ];

        for (tier, record) in tiers {
            let Some(json) = record else { continue };
            match serde_json::from_str::<Session>(&json) {
                Ok(session) => {
                    tracing::info!(tier, username = %session.username, "Session restored");
                    return Ok(Some(&*self.session.insert(session)));
                }
                Err(e) => {
                    tracing::warn!(tier, error = %e, "Ignoring unreadable session record");
                }
            }
        }

        tracing::debug!("No persisted session");
        Ok(None)
    }

    // =========================================================================
    // Sign-in
    // =========================================================================

    /// Validate the form and start a submission.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AlreadySignedIn` while a session is active,
    /// `AuthError::SubmissionInFlight` if a submission is already pending
    /// (in both cases the form is left untouched), or `AuthError::Validation`
    /// with the failing fields (also stored on the form).
    #[instrument(skip(self, form), fields(mode = %form.mode()))]
    pub fn begin_sign_in(&mut self, form: &mut AuthForm) -> Result<PendingSignIn, AuthError> {
        if let Some(session) = &self.session {
            tracing::debug!(username = %session.username, "Rejecting submit while signed in");
            return Err(AuthError::AlreadySignedIn(session.username.clone()));
        }

        if self.in_flight {
            tracing::debug!("Rejecting submit while another is in flight");
            return Err(AuthError::SubmissionInFlight);
        }

        if !form.validate() {
            tracing::debug!(invalid = form.errors().len(), "Form validation failed");
            return Err(AuthError::Validation(form.errors().clone()));
        }

        self.in_flight = true;
        Ok(PendingSignIn {
            request: form.request(),
            delay: self.settings.login_delay,
        })
    }

    /// Finish a submission: build, persist and adopt the session.
    ///
    /// The in-flight flag is lowered even if persistence fails.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` or `AuthError::Serialization` if the
    /// session cannot be persisted; the service stays signed out.
    #[instrument(skip(self, request, form), fields(mode = %request.mode))]
    pub fn complete_sign_in(
        &mut self,
        request: &SignInRequest,
        form: &mut AuthForm,
    ) -> Result<&Session, AuthError> {
        self.in_flight = false;

        let session = self.build_session(request, Utc::now());
        self.persist(&session, request.remember_me)?;

        tracing::info!(
            username = %session.username,
            remember = request.remember_me,
            "Signed in"
        );
        form.reset();
        Ok(&*self.session.insert(session))
    }

    /// Validate, wait out the round trip, and sign in.
    ///
    /// # Errors
    ///
    /// See [`Self::begin_sign_in`] and [`Self::complete_sign_in`].
    pub async fn sign_in(&mut self, form: &mut AuthForm) -> Result<&Session, AuthError> {
        let pending = self.begin_sign_in(form)?;
        let request = match pending.resolve().await {
            Ok(request) => request,
            Err(e) => {
                self.in_flight = false;
                return Err(e);
            }
        };
        self.complete_sign_in(&request, form)
    }

    /// Construct the session record for a validated request.
    ///
    /// `joined_date` is always `now`, even for returning users.
    fn build_session(&self, request: &SignInRequest, now: DateTime<Utc>) -> Session {
        let (name, username, email) = match request.mode {
            AuthMode::Signup => (
                request.name.clone(),
                request.username.clone(),
                request.email.clone(),
            ),
            AuthMode::Login => match Email::parse(&request.username) {
                Ok(email) => {
                    let local = email.local_part().to_string();
                    (local.clone(), local, email.into_inner())
                }
                Err(_) => (
                    request.username.clone(),
                    request.username.clone(),
                    format!("{}@{}", request.username, self.settings.store_domain),
                ),
            },
        };

        let seed = if request.username.is_empty() {
            &request.email
        } else {
            &request.username
        };

        Session {
            id: UserId::new(now.timestamp_millis()),
            name,
            username,
            email,
            avatar: self.avatars.avatar_url(seed),
            joined_date: now,
        }
    }

    fn persist(&mut self, session: &Session, remember: bool) -> Result<(), AuthError> {
        let json = serde_json::to_string(session)?;
        if remember {
            let durable = self.storage.durable_mut();
            durable.set(keys::USER, &json)?;
            durable.set(keys::REMEMBER, keys::REMEMBER_VALUE)?;
        } else {
            self.storage.session_mut().set(keys::USER, &json)?;
            self.storage.durable_mut().remove(keys::REMEMBER)?;
        }
        Ok(())
    }

    // =========================================================================
    // Sign-out
    // =========================================================================

    /// Sign out and erase every persisted trace of the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if a tier cannot be written. The in-memory
    /// session is cleared regardless.
    #[instrument(skip(self))]
    pub fn sign_out(&mut self) -> Result<(), AuthError> {
        if let Some(session) = self.session.take() {
            tracing::info!(username = %session.username, "Signed out");
        }

        self.storage.durable_mut().remove(keys::USER)?;
        self.storage.session_mut().remove(keys::USER)?;
        self.storage.durable_mut().remove(keys::REMEMBER)?;
        Ok(())
    }
}
