//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product variant price.
///
/// Amounts are in the backend's standard currency unit (e.g., dollars, not
/// cents). Positivity is a draft invariant enforced by form validation, not
/// by construction, so a deserialized price can be inspected before being
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the price satisfies the draft invariant (strictly positive).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_price_is_valid() {
        assert!(Price::new(Decimal::new(1999, 2)).is_valid());
    }

    #[test]
    fn test_zero_and_negative_prices_are_invalid() {
        assert!(!Price::new(Decimal::ZERO).is_valid());
        assert!(!Price::new(Decimal::new(-100, 2)).is_valid());
    }

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Price::new(Decimal::new(5, 0)).to_string(), "5.00");
    }
}
