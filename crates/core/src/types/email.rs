//! Email address type.
//!
//! The accepted shape is `local@domain.tld`: one `@`, no whitespace, and a
//! domain containing a dot with at least one character on either side.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a string is not an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email is empty")]
    Empty,
    #[error("email contains whitespace")]
    Whitespace,
    #[error("email has no @")]
    MissingAtSymbol,
    #[error("email has more than one @")]
    MultipleAtSymbols,
    #[error("nothing before the @")]
    EmptyLocalPart,
    #[error("nothing after the @")]
    EmptyDomain,
    #[error("domain {0:?} has no top-level part")]
    MissingTopLevelDomain(String),
}

/// A validated email address.
///
/// ```
/// use techstore_core::Email;
///
/// let email = Email::parse("jane.doe+news@mail.example.in").unwrap();
/// assert_eq!(email.local_part(), "jane.doe+news");
/// assert_eq!(email.domain(), "mail.example.in");
///
/// assert!(!Email::is_valid("jane@localhost"));
/// assert!(!Email::is_valid("jane doe@x.com"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email {
    address: String,
    at: usize,
}

impl Email {
    /// Validate `s` as an email address.
    ///
    /// # Errors
    ///
    /// Returns the first rule the input breaks. Length is not limited.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.contains(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;
        if domain.contains('@') {
            return Err(EmailError::MultipleAtSymbols);
        }
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }
        if !has_top_level(domain) {
            return Err(EmailError::MissingTopLevelDomain(domain.to_owned()));
        }

        Ok(Self {
            address: s.to_owned(),
            at: local.len(),
        })
    }

    /// Whether `s` has the email shape.
    #[must_use]
    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_ok()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.address
    }

    /// The part before the `@`.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.address.split_at(self.at).0
    }

    /// The part after the `@`.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.address.split_at(self.at + 1).1
    }
}

/// Some `.` has a character on both sides.
fn has_top_level(domain: &str) -> bool {
    let last = domain.len().saturating_sub(1);
    domain
        .match_indices('.')
        .any(|(i, _)| i > 0 && i < last)
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.address
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.address
    }
}
