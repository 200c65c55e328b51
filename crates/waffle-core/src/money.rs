//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A $2.00 waffle with $0.20 off per extra unit, four waffles:            │
//! │    2.0 + 1.8 + 1.6 + 1.4 = 6.800000000000001  ❌                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    200 + 180 + 160 + 140 = 680 cents           ✅                       │
//! │                                                                         │
//! │  Every menu price is a whole number of cents, so the only rounding     │
//! │  left is the per-unit price of a batch and the discount amount, and    │
//! │  both happen in exactly one place each (below).                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use waffle_core::money::Money;
//!
//! let milo_meal = Money::from_cents(400); // $4.00
//! let two = milo_meal * 2;                // $8.00
//! assert_eq!(two.to_string(), "$8.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: Discount sums are not clamped, so a final total can
///   legitimately go below zero
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Catalog price ──► CartLineItem.unit_price ──► CartLineItem.line_total  │
/// │                                                                         │
/// │  CartStore.subtotal ──► apply_discounts ──► final total at checkout    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use waffle_core::money::Money;
    ///
    /// let price = Money::from_cents(450); // $4.50
    /// assert_eq!(price.cents(), 450);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the dollars portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use waffle_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(425);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 1275);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Splits an amount evenly over `qty` units, rounding half up to the cent.
    ///
    /// Used for the displayed unit price of a custom batch, where the batch
    /// total does not divide evenly.
    ///
    /// ## Example
    /// ```rust
    /// use waffle_core::money::Money;
    ///
    /// // $5.40 over 3 waffles = $1.80 each
    /// assert_eq!(Money::from_cents(540).per_unit(3).cents(), 180);
    ///
    /// // $10.00 over 3 = $3.333.. → $3.33
    /// assert_eq!(Money::from_cents(1000).per_unit(3).cents(), 333);
    ///
    /// // $0.05 over 2 = $0.025 → $0.03
    /// assert_eq!(Money::from_cents(5).per_unit(2).cents(), 3);
    /// ```
    pub fn per_unit(&self, qty: i64) -> Money {
        if qty <= 0 {
            return *self;
        }
        let cents = self.0 as i128;
        let qty = qty as i128;
        let rounded = if cents >= 0 {
            (cents * 2 + qty) / (qty * 2)
        } else {
            (cents * 2 - qty) / (qty * 2)
        };
        Money(rounded as i64)
    }

    /// Applies a combined discount rate and returns the amount left to pay.
    ///
    /// ## Formula
    /// `subtotal - round(subtotal × rate)`, with the discount amount rounded
    /// half away from zero to the cent.
    ///
    /// Rates above 100% are NOT clamped: the result goes negative.
    ///
    /// ## Example
    /// ```rust
    /// use waffle_core::money::Money;
    /// use waffle_core::types::DiscountRate;
    ///
    /// let subtotal = Money::from_cents(1000);
    /// assert_eq!(subtotal.apply_discount(DiscountRate::from_percent(15)).cents(), 850);
    /// assert_eq!(subtotal.apply_discount(DiscountRate::from_bps(12_000)).cents(), -200);
    /// ```
    pub fn apply_discount(&self, rate: DiscountRate) -> Money {
        *self - self.discount_amount(rate)
    }

    /// Returns how much a rate takes off this amount, rounded to the cent.
    pub fn discount_amount(&self, rate: DiscountRate) -> Money {
        let product = self.0 as i128 * rate.bps() as i128;
        let amount = if product >= 0 {
            (product + 5000) / 10000
        } else {
            (product - 5000) / 10000
        };
        Money(amount as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$4.50` / `-$0.20`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
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

/// Multiplication by i64 (for quantity calculations).
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

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
