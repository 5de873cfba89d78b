//! Unit price representation using decimal arithmetic.
//!
//! The cart never computes with prices; it carries them from the product
//! source to storage and back. Prices persist as plain JSON numbers
//! (`"price": 2.5`) for compatibility with carts written by earlier clients.
//! The number is written with the decimal's exact digits, never through an
//! `f64`, so every price reads back unchanged.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Price of a single unit of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitPrice(#[serde(with = "rust_decimal::serde::arbitrary_precision")] Decimal);

impl UnitPrice {
    /// Create a new unit price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a unit price from a floating point amount.
    ///
    /// Returns `None` for NaN or infinite values.
    #[must_use]
    pub fn from_f64(amount: f64) -> Option<Self> {
        Decimal::from_f64(amount).map(Self)
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:.2}", self.0))
    }
}

impl FromStr for UnitPrice {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self)
    }
}

impl From<Decimal> for UnitPrice {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_json_number() {
        let price: UnitPrice = "2.5".parse().expect("valid decimal");
        let json = serde_json::to_string(&price).expect("serialize");
        assert_eq!(json, "2.5");
    }

    #[test]
    fn test_deserializes_integers_and_floats() {
        let whole: UnitPrice = serde_json::from_str("3").expect("integer price");
        assert_eq!(whole, UnitPrice::new(Decimal::new(3, 0)));

        let cents: UnitPrice = serde_json::from_str("19.99").expect("float price");
        assert_eq!(cents, UnitPrice::new(Decimal::new(1999, 2)));
    }

    #[test]
    fn test_high_precision_survives_json() {
        let price: UnitPrice = "0.1234567890123456789".parse().expect("valid decimal");
        let json = serde_json::to_string(&price).expect("serialize");
        assert_eq!(json, "0.1234567890123456789");

        let back: UnitPrice = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, price);
        assert_eq!(back.amount().scale(), 19);
    }

    #[test]
    fn test_display_two_decimals() {
        let price = UnitPrice::new(Decimal::new(25, 1));
        assert_eq!(price.to_string(), "2.50");
    }

    #[test]
    fn test_from_f64_rejects_nan() {
        assert!(UnitPrice::from_f64(f64::NAN).is_none());
        assert_eq!(
            UnitPrice::from_f64(2.5),
            Some(UnitPrice::new(Decimal::new(25, 1)))
        );
    }
}
