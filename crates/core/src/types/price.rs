//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A unit price in the store currency.
///
/// Wraps a `Decimal` so quantities and money can't be mixed up in
/// arithmetic. Serializes as a decimal string; deserializes from either
/// a string or a bare JSON number (the catalog API serves numbers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Total price for `quantity` units.
    #[must_use]
    pub fn line_total(&self, quantity: u32) -> Decimal {
        self.0 * Decimal::from(quantity)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("valid decimal literal")
    }

    #[test]
    fn test_line_total() {
        let price = Price::new(dec("19.99"));
        assert_eq!(price.line_total(3), dec("59.97"));
    }

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Price::new(dec("139.9")).to_string(), "$139.90");
    }

    #[test]
    fn test_deserialize_from_json_number() {
        let price: Price = serde_json::from_str("139.9").expect("deserialize");
        assert_eq!(price.amount(), dec("139.9"));
    }
}
