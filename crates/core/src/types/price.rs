//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are always exact [`Decimal`] values. Formatting for display is a
//! separate step and never feeds back into stored amounts.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Maximum fractional digits shown when displaying a price.
const MAX_DISPLAY_FRACTION_DIGITS: u32 = 3;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paise).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in Indian rupees.
    #[must_use]
    pub const fn inr(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::INR)
    }

    /// Format for display, e.g. `₹1,29,999`.
    ///
    /// Digits are grouped using the currency's regional convention and at
    /// most three fractional digits are shown, with trailing zeros trimmed.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(
                MAX_DISPLAY_FRACTION_DIGITS,
                RoundingStrategy::MidpointAwayFromZero,
            )
            .normalize();

        let digits = rounded.abs().to_string();
        let (integer, fraction) = digits
            .split_once('.')
            .map_or((digits.as_str(), None), |(i, f)| (i, Some(f)));

        let mut out = String::new();
        if rounded.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        out.push_str(self.currency_code.symbol());
        out.push_str(&self.currency_code.grouping().apply(integer));
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Currency symbol placed before the amount.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Digit grouping convention for the currency's home locale.
    const fn grouping(self) -> DigitGrouping {
        match self {
            Self::INR => DigitGrouping::Indian,
            Self::USD | Self::EUR | Self::GBP => DigitGrouping::Thousands,
        }
    }
}

/// How integer digits are separated for display.
#[derive(Debug, Clone, Copy)]
enum DigitGrouping {
    /// `1,234,567`
    Thousands,
    /// `12,34,567` (en-IN: last three digits, then pairs)
    Indian,
}

impl DigitGrouping {
    fn apply(self, integer: &str) -> String {
        let chars: Vec<char> = integer.chars().collect();
        let len = chars.len();
        let mut out = String::with_capacity(len + len / 2);

        for (i, c) in chars.iter().enumerate() {
            let remaining = len - i;
            if i > 0 && self.separator_before(remaining) {
                out.push(',');
            }
            out.push(*c);
        }
        out
    }

    /// Whether a separator goes before a digit with `remaining` digits left
    /// (including itself).
    const fn separator_before(self, remaining: usize) -> bool {
        match self {
            Self::Thousands => remaining % 3 == 0,
            Self::Indian => remaining == 3 || (remaining > 3 && remaining % 2 == 1),
        }
    }
}
