//! Sign-in / sign-up form state and validation.

use secrecy::{ExposeSecret, SecretString};

use techstore_core::{AuthMode, Email, EmailError, Handle, HandleError};

/// Minimum password length for both modes.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum trimmed display-name length for sign-up.
pub const MIN_NAME_LENGTH: usize = 2;

/// Form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    /// Handle on sign-up; handle or email on login.
    Username,
    Email,
    Password,
    ConfirmPassword,
}

impl FormField {
    /// All fields in form order.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Username,
        Self::Email,
        Self::Password,
        Self::ConfirmPassword,
    ];

    /// Input name attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }

    /// Whether the field's value must never be logged or echoed.
    #[must_use]
    pub const fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword)
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown form field: {s}"))
    }
}

/// Pending validation message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    name: Option<&'static str>,
    username: Option<&'static str>,
    email: Option<&'static str>,
    password: Option<&'static str>,
    confirm_password: Option<&'static str>,
}

impl FieldErrors {
    #[must_use]
    pub const fn get(&self, field: FormField) -> Option<&'static str> {
        match field {
            FormField::Name => self.name,
            FormField::Username => self.username,
            FormField::Email => self.email,
            FormField::Password => self.password,
            FormField::ConfirmPassword => self.confirm_password,
        }
    }

    const fn slot(&mut self, field: FormField) -> &mut Option<&'static str> {
        match field {
            FormField::Name => &mut self.name,
            FormField::Username => &mut self.username,
            FormField::Email => &mut self.email,
            FormField::Password => &mut self.password,
            FormField::ConfirmPassword => &mut self.confirm_password,
        }
    }

    pub const fn set(&mut self, field: FormField, message: &'static str) {
        *self.slot(field) = Some(message);
    }

    pub const fn clear(&mut self, field: FormField) {
        *self.slot(field) = None;
    }

    /// Fields with a message, in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        FormField::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|message| (field, message)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Authentication form: inputs, active mode, remember choice and errors.
pub struct AuthForm {
    mode: AuthMode,
    name: String,
    username: String,
    email: String,
    password: SecretString,
    confirm_password: SecretString,
    remember_me: bool,
    errors: FieldErrors,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new(AuthMode::Login)
    }
}

impl std::fmt::Debug for AuthForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthForm")
            .field("mode", &self.mode)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .field("remember_me", &self.remember_me)
            .field("errors", &self.errors)
            .finish()
    }
}

impl AuthForm {
    /// Empty form in the given mode.
    #[must_use]
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            name: String::new(),
            username: String::new(),
            email: String::new(),
            password: SecretString::from(String::new()),
            confirm_password: SecretString::from(String::new()),
            remember_me: false,
            errors: FieldErrors::default(),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Switch between login and sign-up.
    ///
    /// Clears every input and every pending error. The remember choice is
    /// kept.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.reset();
    }

    /// Switch to `mode`, clearing the form if it changes.
    pub fn set_mode(&mut self, mode: AuthMode) {
        if self.mode != mode {
            self.toggle_mode();
        }
    }

    /// Enter a value. Clears that field's pending error only.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Username => self.username = value,
            FormField::Email => self.email = value,
            FormField::Password => self.password = SecretString::from(value),
            FormField::ConfirmPassword => self.confirm_password = SecretString::from(value),
        }
        self.errors.clear(field);
    }

    /// Current value of a non-secret field; `None` for password fields.
    #[must_use]
    pub fn field(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Name => Some(&self.name),
            FormField::Username => Some(&self.username),
            FormField::Email => Some(&self.email),
            FormField::Password | FormField::ConfirmPassword => None,
        }
    }

    #[must_use]
    pub const fn remember_me(&self) -> bool {
        self.remember_me
    }

    pub const fn set_remember_me(&mut self, remember: bool) {
        self.remember_me = remember;
    }

    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Run every rule for the active mode and store the result.
    ///
    /// Returns `true` when no field has an error.
    pub fn validate(&mut self) -> bool {
        self.errors = validate(self);
        self.errors.is_empty()
    }

    /// Clear all inputs and errors.
    pub fn reset(&mut self) {
        self.name.clear();
        self.username.clear();
        self.email.clear();
        self.password = SecretString::from(String::new());
        self.confirm_password = SecretString::from(String::new());
        self.errors = FieldErrors::default();
    }

    /// Snapshot of the inputs needed to build a session.
    pub(crate) fn request(&self) -> SignInRequest {
        SignInRequest {
            mode: self.mode,
            name: self.name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            remember_me: self.remember_me,
        }
    }
}

/// Validated, password-free inputs carried through the simulated round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInRequest {
    pub mode: AuthMode,
    pub name: String,
    pub username: String,
    pub email: String,
    pub remember_me: bool,
}

/// Evaluate every rule for the form's mode.
///
/// Only the first failing rule per field is reported.
#[must_use]
pub fn validate(form: &AuthForm) -> FieldErrors {
    let mut errors = FieldErrors::default();
    let password = form.password.expose_secret();

    match form.mode {
        AuthMode::Signup => {
            if form.name.trim().chars().count() < MIN_NAME_LENGTH {
                errors.set(FormField::Name, "Name must be at least 2 characters");
            }

            if let Err(e) = Handle::parse(&form.username) {
                errors.set(
                    FormField::Username,
                    match e {
                        HandleError::Empty => "Username is required",
                        HandleError::TooShort { .. } => "Username must be at least 3 characters",
                        HandleError::InvalidCharacter => {
                            "Username can only contain letters, numbers, and underscores"
                        }
                    },
                );
            }

            if let Err(e) = Email::parse(&form.email) {
                errors.set(
                    FormField::Email,
                    match e {
                        EmailError::Empty => "Email is required",
                        _ => "Please enter a valid email",
                    },
                );
            }

            if password != form.confirm_password.expose_secret() {
                errors.set(FormField::ConfirmPassword, "Passwords do not match");
            }
        }
        AuthMode::Login => {
            if form.username.is_empty() {
                errors.set(FormField::Username, "Username or email is required");
            }
        }
    }

    if password.is_empty() {
        errors.set(FormField::Password, "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.set(
            FormField::Password,
            "Password must be at least 6 characters",
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(name: &str, username: &str, email: &str, password: &str, confirm: &str) -> AuthForm {
        let mut form = AuthForm::new(AuthMode::Signup);
        form.set_field(FormField::Name, name);
        form.set_field(FormField::Username, username);
        form.set_field(FormField::Email, email);
        form.set_field(FormField::Password, password);
        form.set_field(FormField::ConfirmPassword, confirm);
        form
    }

    #[test]
    fn test_valid_signup() {
        let mut form = signup("Jane Doe", "jane_doe", "jane@x.com", "secret1", "secret1");
        assert!(form.validate());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_long_email_is_accepted() {
        let email = format!("{}@x.com", "a".repeat(300));
        let mut form = signup("Jane Doe", "jane_doe", &email, "secret1", "secret1");
        assert!(form.validate());
        assert_eq!(form.errors().get(FormField::Email), None);
    }

    #[test]
    fn test_short_password_is_not_a_mismatch() {
        let mut form = signup("Jane Doe", "jane_doe", "jane@x.com", "abc12", "abc12");
        assert!(!form.validate());
        assert_eq!(
            form.errors().get(FormField::Password),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(form.errors().get(FormField::ConfirmPassword), None);
        assert_eq!(form.errors().len(), 1);
    }

    #[test]
    fn test_all_signup_rules_evaluated_together() {
        let mut form = signup(" J ", "jd", "jane@", "", "x");
        assert!(!form.validate());

        let errors: Vec<_> = form.errors().iter().collect();
        assert_eq!(
            errors,
            vec![
                (FormField::Name, "Name must be at least 2 characters"),
                (FormField::Username, "Username must be at least 3 characters"),
                (FormField::Email, "Please enter a valid email"),
                (FormField::Password, "Password is required"),
                (FormField::ConfirmPassword, "Passwords do not match"),
            ]
        );
    }

    #[test]
    fn test_signup_required_messages() {
        let mut form = AuthForm::new(AuthMode::Signup);
        assert!(!form.validate());
        assert_eq!(
            form.errors().get(FormField::Username),
            Some("Username is required")
        );
        assert_eq!(form.errors().get(FormField::Email), Some("Email is required"));
        // Both passwords empty: equal, so no mismatch.
        assert_eq!(form.errors().get(FormField::ConfirmPassword), None);
    }

    #[test]
    fn test_signup_username_charset() {
        let mut form = signup("Jane", "jane.doe", "jane@x.com", "secret1", "secret1");
        assert!(!form.validate());
        assert_eq!(
            form.errors().get(FormField::Username),
            Some("Username can only contain letters, numbers, and underscores")
        );
    }

    #[test]
    fn test_login_rules() {
        let mut form = AuthForm::new(AuthMode::Login);
        assert!(!form.validate());
        assert_eq!(
            form.errors().get(FormField::Username),
            Some("Username or email is required")
        );
        assert_eq!(
            form.errors().get(FormField::Password),
            Some("Password is required")
        );

        // Login accepts any identifier shape; no name/email/confirm rules.
        form.set_field(FormField::Username, "j");
        form.set_field(FormField::Password, "secret1");
        assert!(form.validate());
    }

    #[test]
    fn test_editing_clears_only_that_field() {
        let mut form = AuthForm::new(AuthMode::Login);
        form.validate();
        assert_eq!(form.errors().len(), 2);

        form.set_field(FormField::Username, "jane");
        assert_eq!(form.errors().get(FormField::Username), None);
        assert_eq!(
            form.errors().get(FormField::Password),
            Some("Password is required")
        );
    }

    #[test]
    fn test_toggle_mode_clears_fields_and_errors() {
        let mut form = signup("Jane", "jane", "jane@x.com", "secret1", "nope");
        form.set_remember_me(true);
        form.validate();
        assert!(form.errors().get(FormField::ConfirmPassword).is_some());

        form.toggle_mode();
        assert_eq!(form.mode(), AuthMode::Login);
        assert!(form.errors().is_empty());
        assert_eq!(form.field(FormField::Username), Some(""));
        assert_eq!(form.field(FormField::Name), Some(""));

        // A fresh validation cannot resurrect the old confirm error.
        form.toggle_mode();
        form.set_field(FormField::Password, "secret1");
        form.validate();
        assert_eq!(form.errors().get(FormField::ConfirmPassword), Some("Passwords do not match"));
        assert!(form.remember_me());
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let form = signup("Jane", "jane", "jane@x.com", "hunter22", "hunter22");
        let debug = format!("{form:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter22"));
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("confirmPassword".parse::<FormField>(), Ok(FormField::ConfirmPassword));
        assert!("phone".parse::<FormField>().is_err());
    }
}
