//! Signed-in user record.
//!
//! This is the record persisted under [`crate::store::keys::USER`]. Field
//! names are camelCase so the stored JSON matches what earlier shells wrote.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use techstore_core::UserId;

/// The currently signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Login time in epoch milliseconds.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Handle (username).
    pub username: String,
    pub email: String,
    /// Avatar image URL.
    pub avatar: String,
    /// Set to the login time on every sign-in.
    pub joined_date: DateTime<Utc>,
}

impl Session {
    /// First word of the display name, for the header greeting.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split(' ').next().unwrap_or(&self.name)
    }
}

/// Whether anyone is signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState<'a> {
    SignedOut,
    SignedIn(&'a Session),
}

impl<'a> SessionState<'a> {
    /// The session, when signed in.
    #[must_use]
    pub const fn session(self) -> Option<&'a Session> {
        match self {
            Self::SignedOut => None,
            Self::SignedIn(session) => Some(session),
        }
    }

    #[must_use]
    pub const fn is_signed_in(self) -> bool {
        matches!(self, Self::SignedIn(_))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn session(name: &str) -> Session {
        Session {
            id: UserId::new(1_700_000_000_000),
            name: name.to_string(),
            username: "jane".to_string(),
            email: "jane@x.com".to_string(),
            avatar: "https://avatars.example.com/?seed=jane".to_string(),
            joined_date: DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
        }
    }

    #[test]
    fn test_first_name() {
        assert_eq!(session("Jane Doe").first_name(), "Jane");
        assert_eq!(session("jane").first_name(), "jane");
    }

    #[test]
    fn test_record_uses_camel_case() {
        let json = serde_json::to_value(session("Jane Doe")).unwrap();
        assert_eq!(json["id"], 1_700_000_000_000_i64);
        assert_eq!(json["username"], "jane");
        assert!(json.get("joinedDate").is_some());
    }

    #[test]
    fn test_state_accessors() {
        assert!(!SessionState::SignedOut.is_signed_in());
        let jane = session("Jane");
        let state = SessionState::SignedIn(&jane);
        assert_eq!(state.session().unwrap().email, "jane@x.com");
    }
}
