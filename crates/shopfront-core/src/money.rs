//! # Money Module
//!
//! Integer-cent monetary values.
//!
//! Catalog prices arrive as dollars-and-cents (`129.99`); summing those as
//! floats drifts (`0.1 + 0.2 != 0.3`). Every price in the store is therefore
//! held as a whole number of cents and only formatted at the edge.
//!
//! ```rust
//! use shopfront_core::money::Money;
//!
//! let price = Money::from_cents(12_999); // $129.99
//! assert_eq!((price * 2).to_string(), "$259.98");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::types::TaxRate;

/// A monetary value in cents.
///
/// Signed so that differences (savings against an old price) stay in the
/// same type. Arithmetic saturates at the `i64` bounds instead of wrapping
/// or panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a value from whole dollars and remaining cents.
    ///
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(24, 99).cents(), 2499);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        Money(major * 100 + minor)
    }

    /// Returns the raw cent count.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Unit price times quantity, saturating at the `i64` bounds.
    ///
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let line = Money::from_cents(1999).multiply_quantity(3);
    /// assert_eq!(line.cents(), 5997);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Tax owed on this amount, rounded half up to the nearest cent.
    ///
    /// ```rust
    /// use shopfront_core::money::Money;
    /// use shopfront_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(15_497);
    /// assert_eq!(subtotal.calculate_tax(TaxRate::from_bps(1000)).cents(), 1550);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps large carts from overflowing before the division.
        let tax_cents = (i128::from(self.0) * i128::from(rate.bps()) + 5000) / 10_000;
        Money(tax_cents.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
    }

    /// Discount of `self` relative to a higher `original` price, rounded to
    /// the nearest whole percent.
    ///
    /// Returns `None` when `original` is not above `self`.
    ///
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let now = Money::from_cents(12_999);
    /// let was = Money::from_cents(15_999);
    /// assert_eq!(now.discount_percent_from(was), Some(19));
    /// ```
    pub fn discount_percent_from(&self, original: Money) -> Option<u32> {
        if original.0 <= self.0 || original.0 <= 0 {
            return None;
        }
        let saved = (i128::from(original.0) - i128::from(self.0)) * 200;
        let whole = i128::from(original.0);
        Some(((saved + whole) / (2 * whole)) as u32)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(12_999).to_string(), "$129.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(7).to_string(), "$0.07");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_sum_of_line_totals() {
        let lines = [Money::from_cents(1999), Money::from_cents(2499), Money::from_cents(1)];
        let total: Money = lines.iter().sum();
        assert_eq!(total.cents(), 4499);

        let empty: Vec<Money> = Vec::new();
        assert!(empty.into_iter().sum::<Money>().is_zero());
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // $0.05 at 10% = 0.5 cents -> 1 cent
        assert_eq!(Money::from_cents(5).calculate_tax(TaxRate::from_bps(1000)).cents(), 1);
        // $0.04 at 10% = 0.4 cents -> 0 cents
        assert_eq!(Money::from_cents(4).calculate_tax(TaxRate::from_bps(1000)).cents(), 0);
        assert!(Money::from_cents(10_000).calculate_tax(TaxRate::zero()).is_zero());
    }

    #[test]
    fn test_discount_percent() {
        let now = Money::from_cents(19_999);
        assert_eq!(now.discount_percent_from(Money::from_cents(24_999)), Some(20));
        assert_eq!(now.discount_percent_from(now), None);
        assert_eq!(now.discount_percent_from(Money::from_cents(100)), None);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let price = Money::from_cents(12_999);
        assert_eq!(price.multiply_quantity(i64::MAX).cents(), i64::MAX);
        assert_eq!((price * (i64::MAX / 100)).cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MAX) + price).cents(), i64::MAX);

        let mut total = Money::from_cents(i64::MAX - 1);
        total += price;
        assert_eq!(total.cents(), i64::MAX);

        let lines = [Money::from_cents(i64::MAX), Money::from_cents(i64::MAX)];
        assert_eq!(lines.iter().sum::<Money>().cents(), i64::MAX);

        // Tax on a saturated subtotal stays representable.
        let tax = Money::from_cents(i64::MAX).calculate_tax(TaxRate::from_bps(1000));
        assert_eq!(tax.cents(), i64::MAX / 10 + 1);
        assert_eq!((Money::from_cents(i64::MAX) + tax).cents(), i64::MAX);
    }

    #[test]
    fn test_savings_can_be_negative() {
        let diff = Money::from_cents(100) - Money::from_cents(250);
        assert!(diff.is_negative());
        assert_eq!(diff.cents(), -150);
    }
}
