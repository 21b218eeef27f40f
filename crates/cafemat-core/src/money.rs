//! # Money Module
//!
//! Provides the `Money` type for prices, payments and change.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ONE UNIT, NO FRACTIONS                                                 │
//! │                                                                         │
//! │  The machine prices in colones and its coins are whole colones          │
//! │  (25, 50, 100, 500). Every amount is an i64 count of the smallest       │
//! │  unit, so change-making is exact integer division:                      │
//! │                                                                         │
//! │    130 / 100 = 1 coin, remainder 30                                     │
//! │     30 /  25 = 1 coin, remainder  5  → no 5-coin → infeasible           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cafemat_core::money::Money;
//!
//! let latte = Money::new(1350);
//! let two_lattes = latte * 2;
//! assert_eq!(two_lattes.amount(), 2700);
//!
//! let change = Money::new(3000) - two_lattes;
//! assert_eq!(change.amount(), 300);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::{CoinCount, Denomination};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: change is computed as `tendered - total`, which is
///   negative for underpayment; the calculator rejects that explicitly
/// - **Single field tuple struct**: serializes as a bare JSON number
///
/// ## Where Money is Used
/// ```text
/// ItemCatalog price ──► price × quantity ──► total_cost
///                                               │
/// Payment.total_amount ─────────────────────────┴──► change_amount
///                                                        │
///                                  ChangeBreakdown.total() ◄┘ (must match)
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from a count of the smallest currency unit.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Money(amount)
    }

    /// Value of `count` coins of `denomination`.
    ///
    /// ## Example
    /// ```rust
    /// use cafemat_core::money::Money;
    ///
    /// assert_eq!(Money::from_coins(25, 4), Money::new(100));
    /// ```
    #[inline]
    pub const fn from_coins(denomination: Denomination, count: CoinCount) -> Self {
        // u32 × u32 can exceed i64::MAX; saturate rather than wrap
        Money((denomination as i64).saturating_mul(count as i64))
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
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

    /// Multiplies a unit price by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use cafemat_core::money::Money;
    ///
    /// let espresso = Money::new(50);
    /// assert_eq!(espresso.checked_mul_quantity(3), Some(Money::new(150)));
    /// assert_eq!(Money::new(i64::MAX).checked_mul_quantity(2), None);
    /// ```
    #[inline]
    pub fn checked_mul_quantity(&self, qty: i64) -> Option<Money> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Adds two amounts, clamping at the numeric bounds.
    #[inline]
    pub const fn saturating_add(&self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Colón sign followed by the amount, e.g. `₡1350`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₡{}", sign, self.0.unsigned_abs())
    }
}

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

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
