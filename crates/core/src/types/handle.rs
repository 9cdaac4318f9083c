//! Username handle type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Handle`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    /// The input string is empty.
    #[error("handle cannot be empty")]
    Empty,
    /// The input string is too short.
    #[error("handle must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The input contains a character outside `[A-Za-z0-9_]`.
    #[error("handle can only contain letters, numbers, and underscores")]
    InvalidCharacter,
}

/// A username handle.
///
/// ## Constraints
///
/// - At least 3 characters
/// - ASCII letters, digits and underscores only
///
/// ```
/// use techstore_core::Handle;
///
/// assert!(Handle::parse("jane_doe").is_ok());
/// assert!(Handle::parse("jd").is_err());
/// assert!(Handle::parse("jane.doe").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    /// Minimum length of a handle.
    pub const MIN_LENGTH: usize = 3;

    /// Parse a `Handle` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, shorter than three characters,
    /// or contains characters other than letters, digits and underscores.
    pub fn parse(s: &str) -> Result<Self, HandleError> {
        if s.is_empty() {
            return Err(HandleError::Empty);
        }

        if s.chars().count() < Self::MIN_LENGTH {
            return Err(HandleError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(HandleError::InvalidCharacter);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Handle::parse("abc").is_ok());
        assert!(Handle::parse("Jane_Doe_99").is_ok());
    }

    #[test]
    fn test_parse_errors_in_order() {
        assert_eq!(Handle::parse(""), Err(HandleError::Empty));
        // Length is checked before the character set.
        assert_eq!(
            Handle::parse("a!"),
            Err(HandleError::TooShort { min: 3 })
        );
        assert_eq!(
            Handle::parse("jane-doe"),
            Err(HandleError::InvalidCharacter)
        );
        assert_eq!(Handle::parse("jöhn"), Err(HandleError::InvalidCharacter));
    }
}
