//! Monthly tier price, stored as integer cents

use serde::{Deserialize, Serialize};
use std::fmt;

/// Price in USD cents. Always strictly positive once validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Smallest accepted price (0.01)
    pub const MIN_CENTS: i64 = 1;

    /// Build a price, rejecting zero and negative amounts
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        if cents < Self::MIN_CENTS {
            return Err(PriceError::NotPositive(cents));
        }
        Ok(Self(cents))
    }

    #[inline]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Parse a decimal amount such as `"5"`, `"5.5"` or `"7.50"`
    pub fn parse(amount: &str) -> Result<Self, PriceError> {
        let amount = amount.trim();
        let (whole, frac) = match amount.split_once('.') {
            Some((w, f)) => (w, f),
            None => (amount, ""),
        };

        let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || frac.len() > 2 || !digits_only(whole) || !digits_only(frac) {
            return Err(PriceError::InvalidFormat(amount.to_string()));
        }

        let whole: i64 = whole
            .parse()
            .map_err(|_| PriceError::InvalidFormat(amount.to_string()))?;
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().unwrap_or(0) * 10,
            _ => frac.parse().unwrap_or(0),
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .ok_or_else(|| PriceError::InvalidFormat(amount.to_string()))?;

        Self::from_cents(cents)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Price construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    #[error("price must be greater than zero, got {0} cents")]
    NotPositive(i64),

    #[error("invalid price amount: {0}")]
    InvalidFormat(String),
}
