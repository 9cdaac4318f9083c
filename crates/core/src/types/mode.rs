//! Mode enums shared by the storefront engine and its shells.

use serde::{Deserialize, Serialize};

/// Product list ordering.
///
/// The string forms match the sort dropdown's option values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortMode {
    /// Catalog order.
    #[default]
    #[serde(rename = "default")]
    None,
    /// Cheapest first.
    #[serde(rename = "price-low")]
    PriceAscending,
    /// Most expensive first.
    #[serde(rename = "price-high")]
    PriceDescending,
    /// Best rated first.
    #[serde(rename = "rating")]
    RatingDescending,
}

impl SortMode {
    /// All modes in dropdown order.
    pub const ALL: [Self; 4] = [
        Self::None,
        Self::PriceAscending,
        Self::PriceDescending,
        Self::RatingDescending,
    ];

    /// Option value for this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "default",
            Self::PriceAscending => "price-low",
            Self::PriceDescending => "price-high",
            Self::RatingDescending => "rating",
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" | "none" => Ok(Self::None),
            "price-low" => Ok(Self::PriceAscending),
            "price-high" => Ok(Self::PriceDescending),
            "rating" => Ok(Self::RatingDescending),
            _ => Err(format!("invalid sort mode: {s}")),
        }
    }
}

/// Which authentication form is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Sign in with a username or email.
    #[default]
    Login,
    /// Create an account.
    Signup,
}

impl AuthMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Signup,
            Self::Signup => Self::Login,
        }
    }
}

impl std::fmt::Display for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login => write!(f, "login"),
            Self::Signup => write!(f, "signup"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_mode_round_trips_option_values() {
        for mode in SortMode::ALL {
            assert_eq!(mode.as_str().parse::<SortMode>().unwrap(), mode);
        }
        assert!("cheapest".parse::<SortMode>().is_err());
    }

    #[test]
    fn test_sort_mode_serde_uses_option_values() {
        let json = serde_json::to_string(&SortMode::PriceDescending).unwrap();
        assert_eq!(json, "\"price-high\"");
    }

    #[test]
    fn test_auth_mode_toggle() {
        assert_eq!(AuthMode::Login.toggled(), AuthMode::Signup);
        assert_eq!(AuthMode::Login.toggled().toggled(), AuthMode::Login);
    }
}
