//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A ledger that adds and reverses thousands of sales would slowly       │
//! │  drift away from the true balance.                                     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paisa                                            │
//! │    Rs 360.00 = 36000 paisa. Addition and subtraction are exact, so     │
//! │    apply-then-reverse always lands back on the starting balance.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use aqua_core::money::Money;
//!
//! let bill = Money::from_rupees(360);          // Rs 360.00
//! let received = Money::from_paisa(12_000);    // Rs 120.00
//! let outstanding = bill - received;           // Rs 240.00
//! assert_eq!(outstanding.paisa(), 24_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paisa).
///
/// ## Design Decisions
/// - **i64 (signed)**: customer balances are signed - a customer in credit
///   has a negative balance, and payment-only sales drive balances down
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support so snapshots round-trip as JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paisa (the smallest currency unit).
    #[inline]
    pub const fn from_paisa(paisa: i64) -> Self {
        Money(paisa)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use aqua_core::money::Money;
    ///
    /// let price = Money::from_rupees(150);
    /// assert_eq!(price.paisa(), 15_000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paisa.
    #[inline]
    pub const fn paisa(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paisa portion (always 0-99).
    #[inline]
    pub const fn paisa_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. The frontend owns user-facing formatting.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rs {}.{:02}", sign, self.rupees().abs(), self.paisa_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Negation, for reversing a previously applied ledger delta.
impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by quantity (line totals).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation, for folding sale histories into balances.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paisa() {
        let money = Money::from_paisa(15_050);
        assert_eq!(money.paisa(), 15_050);
        assert_eq!(money.rupees(), 150);
        assert_eq!(money.paisa_part(), 50);
    }

    #[test]
    fn test_from_rupees() {
        assert_eq!(Money::from_rupees(360).paisa(), 36_000);
        assert_eq!(Money::from_rupees(-5).paisa(), -500);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paisa(15_050)), "Rs 150.50");
        assert_eq!(format!("{}", Money::from_paisa(500)), "Rs 5.00");
        assert_eq!(format!("{}", Money::from_paisa(-550)), "-Rs 5.50");
        assert_eq!(format!("{}", Money::from_paisa(0)), "Rs 0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paisa(1000);
        let b = Money::from_paisa(400);

        assert_eq!((a + b).paisa(), 1400);
        assert_eq!((a - b).paisa(), 600);
        assert_eq!((-a).paisa(), -1000);
        assert_eq!((a * 3).paisa(), 3000);
    }

    #[test]
    fn test_apply_then_reverse_is_exact() {
        let mut balance = Money::from_paisa(12_345);
        let delta = Money::from_paisa(678);

        balance += delta;
        balance -= delta;
        assert_eq!(balance.paisa(), 12_345);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, -50]
            .into_iter()
            .map(Money::from_paisa)
            .sum();
        assert_eq!(total.paisa(), 300);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_paisa(100).is_positive());
        assert!(Money::from_paisa(-100).is_negative());
        assert_eq!(Money::from_paisa(-100).abs().paisa(), 100);
    }
}
