//! Price representation in whole minor currency units.
//!
//! The storefront sells in rubles and never deals in fractions, so a price is
//! a plain count of rubles. Arithmetic saturates instead of wrapping.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

use super::quantity::Quantity;

/// A non-negative amount of money in minor units (whole rubles).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Zero rubles.
    pub const ZERO: Self = Self(0);

    /// Create a price from a count of minor units.
    #[must_use]
    pub const fn new(minor: u64) -> Self {
        Self(minor)
    }

    /// Get the amount in minor units.
    #[must_use]
    pub const fn minor(&self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity.get())))
    }

    /// Amount with digit groups separated the ru-RU way (`12 500`).
    ///
    /// The separator is a non-breaking space so the amount never wraps.
    #[must_use]
    pub fn grouped(&self) -> String {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('\u{a0}');
            }
            out.push(ch);
        }
        out
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ₽", self.grouped())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<u64> for Price {
    fn from(minor: u64) -> Self {
        Self(minor)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped() {
        assert_eq!(Price::new(0).grouped(), "0");
        assert_eq!(Price::new(300).grouped(), "300");
        assert_eq!(Price::new(1_000).grouped(), "1\u{a0}000");
        assert_eq!(Price::new(100_000).grouped(), "100\u{a0}000");
        assert_eq!(Price::new(1_234_567).grouped(), "1\u{a0}234\u{a0}567");
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::new(12_500).to_string(), "12\u{a0}500 ₽");
    }

    #[test]
    fn test_times() {
        let qty = Quantity::new(3).unwrap();
        assert_eq!(Price::new(5_000).times(qty), Price::new(15_000));
        assert_eq!(Price::new(u64::MAX).times(qty), Price::new(u64::MAX));
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::new(100), Price::new(250)].into_iter().sum();
        assert_eq!(total, Price::new(350));
    }

    #[test]
    fn test_serde_is_plain_number() {
        let json = serde_json::to_string(&Price::new(4_990)).unwrap();
        assert_eq!(json, "4990");
        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Price::new(4_990));
    }
}
