//! Sign-in, sign-up and sign-out commands.

use std::io::{BufRead, Write};

use techstore_core::AuthMode;
use techstore_storefront::error::AppError;
use techstore_storefront::services::auth::{AuthError, FormField};
use techstore_storefront::state::AppState;

use super::{CommandError, ask};
use crate::render;

/// Login form inputs.
pub struct LoginForm {
    pub identifier: String,
    pub password: String,
    pub remember: bool,
}

/// Signup form inputs.
pub struct SignupForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub remember: bool,
}

/// Use the password given on the command line, or prompt for it on `input`.
///
/// # Errors
///
/// Returns an error if the prompt cannot be written or the input read.
pub fn password_or_prompt(
    given: Option<String>,
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
) -> Result<String, CommandError> {
    match given {
        Some(password) => Ok(password),
        None => ask(input, out, label),
    }
}

/// Sign in with a username or email.
///
/// # Errors
///
/// Returns an error if the form is invalid or the session cannot be saved.
pub async fn login(
    state: &mut AppState,
    out: &mut impl Write,
    form: LoginForm,
) -> Result<(), CommandError> {
    state.set_auth_mode(AuthMode::Login);
    let fields = state.auth_form_mut();
    fields.set_field(FormField::Username, form.identifier);
    fields.set_field(FormField::Password, form.password);
    fields.set_remember_me(form.remember);

    submit(state, out).await
}

/// Create an account and sign in.
///
/// # Errors
///
/// Returns an error if the form is invalid or the session cannot be saved.
pub async fn signup(
    state: &mut AppState,
    out: &mut impl Write,
    form: SignupForm,
) -> Result<(), CommandError> {
    state.set_auth_mode(AuthMode::Signup);
    let fields = state.auth_form_mut();
    fields.set_field(FormField::Name, form.name);
    fields.set_field(FormField::Username, form.username);
    fields.set_field(FormField::Email, form.email);
    fields.set_field(FormField::Password, form.password);
    fields.set_field(FormField::ConfirmPassword, form.confirm_password);
    fields.set_remember_me(form.remember);

    submit(state, out).await
}

/// Submit the auth form as currently filled in.
///
/// Field errors are printed before the validation error is returned.
pub(crate) async fn submit(
    state: &mut AppState,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let remember = state.auth_form().remember_me();
    let mode = state.auth_form().mode();

    match state.begin_sign_in() {
        Ok(pending) => {
            let verb = if mode == AuthMode::Signup {
                "Creating account"
            } else {
                "Signing in"
            };
            writeln!(out, "{verb}...")?;
            out.flush()?;

            let request = pending.resolve().await.map_err(AppError::from)?;
            let session = state.complete_sign_in(&request)?;
            render::session(out, session)?;
            if !remember {
                writeln!(out, "Signed in for this session only")?;
            }
            Ok(())
        }
        Err(AppError::Auth(AuthError::Validation(errors))) => {
            writeln!(out, "Please fix the following:")?;
            render::field_errors(out, &errors)?;
            Err(AppError::Auth(AuthError::Validation(errors)).into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Show the current session.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn whoami(state: &AppState, out: &mut impl Write) -> Result<(), CommandError> {
    match state.session() {
        Some(session) => render::session(out, session)?,
        None => writeln!(out, "Not signed in")?,
    }
    Ok(())
}

/// Sign out and clear persisted session data.
///
/// # Errors
///
/// Returns an error if a storage tier cannot be written.
pub fn logout(state: &mut AppState, out: &mut impl Write) -> Result<(), CommandError> {
    let was_signed_in = state.session().is_some();
    state.sign_out()?;
    if was_signed_in {
        writeln!(out, "Signed out")?;
    } else {
        writeln!(out, "Not signed in")?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::shop::tests::state;

    #[tokio::test(start_paused = true)]
    async fn test_login_then_logout() {
        let mut state = state();
        let mut out = Vec::new();
        let form = LoginForm {
            identifier: "jane_doe".to_string(),
            password: "secret1".to_string(),
            remember: true,
        };
        login(&mut state, &mut out, form).await.unwrap();
        assert_eq!(state.session().unwrap().email, "jane_doe@techstore.com");

        logout(&mut state, &mut out).unwrap();
        whoami(&state, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Hi, jane_doe"));
        assert!(text.contains("Signed out"));
        assert!(text.ends_with("Not signed in\n"));
    }

    #[test]
    fn test_password_prompted_when_not_given() {
        let mut input = std::io::Cursor::new("secret1\nignored\n");
        let mut out = Vec::new();

        let password = password_or_prompt(None, &mut input, &mut out, "Password").unwrap();
        assert_eq!(password, "secret1");
        assert_eq!(String::from_utf8(out).unwrap(), "Password: ");
    }

    #[test]
    fn test_given_password_skips_prompt() {
        let mut input = std::io::Cursor::new("typed\n");
        let mut out = Vec::new();

        let password =
            password_or_prompt(Some("secret1".to_string()), &mut input, &mut out, "Password")
                .unwrap();
        assert_eq!(password, "secret1");
        assert!(out.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_with_prompted_password() {
        let mut state = state();
        let mut input = std::io::Cursor::new("secret1\n");
        let mut out = Vec::new();

        let password = password_or_prompt(None, &mut input, &mut out, "Password").unwrap();
        let form = LoginForm {
            identifier: "jane@x.com".to_string(),
            password,
            remember: false,
        };
        login(&mut state, &mut out, form).await.unwrap();
        assert_eq!(state.session().unwrap().email, "jane@x.com");
    }

    #[tokio::test(start_paused = true)]
    async fn test_signup_reports_field_errors() {
        let mut state = state();
        let mut out = Vec::new();
        let form = SignupForm {
            name: "J".to_string(),
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret2".to_string(),
            remember: false,
        };
        let err = signup(&mut state, &mut out, form).await.unwrap_err();
        assert!(matches!(err, CommandError::App(ref e) if e.is_user_error()));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("name: Name must be at least 2 characters"));
        assert!(text.contains("confirmPassword: Passwords do not match"));
        assert!(state.session().is_none());
    }
}
