//! Command implementations.
//!
//! Every command writes its output to a caller-supplied writer so the
//! interactive shell and one-shot commands share rendering.

pub mod catalog;
pub mod session;
pub mod shop;

use std::io::{BufRead, Write};

use thiserror::Error;

use techstore_storefront::config::{ConfigError, StorefrontConfig};
use techstore_storefront::error::AppError;
use techstore_storefront::state::AppState;

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    App(#[from] AppError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load configuration and open the storefront with any remembered session.
///
/// # Errors
///
/// Returns an error if configuration, the catalog, or the durable store
/// cannot be loaded.
pub fn open_state() -> Result<AppState, CommandError> {
    let config = StorefrontConfig::from_env()?;
    tracing::debug!(data_dir = %config.data_dir.display(), "Opening storefront");
    Ok(AppState::open(config)?)
}

/// Print `label` and read one line, without its line ending.
pub(crate) fn ask(
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
) -> Result<String, CommandError> {
    write!(out, "{label}: ")?;
    out.flush()?;
    let mut value = String::new();
    input.read_line(&mut value)?;
    Ok(value.trim_end_matches(['\r', '\n']).to_string())
}

pub(crate) fn confirm(
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
) -> Result<bool, CommandError> {
    let answer = ask(input, out, &format!("{label} [y/N]"))?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
