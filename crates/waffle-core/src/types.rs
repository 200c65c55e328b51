//! # Domain Types
//!
//! Core domain types used throughout the kiosk.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CartLineItem   │   │  DiscountKind   │   │  DiscountRate   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  StackAndSave   │   │  bps (u32)      │       │
//! │  │  details        │   │  Student        │   │  500 = 5%       │       │
//! │  │  unit_price     │   │  WordleBonus    │   │                 │       │
//! │  │  quantity       │   └─────────────────┘   └─────────────────┘       │
//! │  │  line_total     │                                                    │
//! │  │  quoted_total   │   ┌─────────────────┐                             │
//! │  └─────────────────┘   │      Page       │                             │
//! │                        │  Home / Order / │                             │
//! │                        │ Wordle/Checkout │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 500 bps = 5% and 10000 bps = 100%.
/// Rates add up linearly; nothing caps their sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a whole percentage.
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        DiscountRate(pct * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a whole percentage, rounded half up.
    ///
    /// ## Example
    /// ```rust
    /// use waffle_core::types::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::from_bps(1500).percent(), 15);
    /// assert_eq!(DiscountRate::from_bps(1250).percent(), 13);
    /// ```
    #[inline]
    pub const fn percent(&self) -> u32 {
        (self.0 + 50) / 100
    }

    /// Returns the rate as a fraction (for display only).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10000.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

impl Add for DiscountRate {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        DiscountRate(self.0 + other.0)
    }
}

impl Sum for DiscountRate {
    fn sum<I: Iterator<Item = DiscountRate>>(iter: I) -> Self {
        iter.fold(DiscountRate::zero(), Add::add)
    }
}

// =============================================================================
// Discount Kind
// =============================================================================

/// The kinds of discount a session can hold, one entry each at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DiscountKind {
    /// Automatic volume discount by waffle count.
    #[serde(rename = "stack_n_save")]
    StackAndSave,
    /// Manual discount for a valid student code.
    #[serde(rename = "student")]
    Student,
    /// Bonus for winning the word game.
    #[serde(rename = "wordle")]
    WordleBonus,
}

impl DiscountKind {
    /// All kinds, in display order.
    pub const ALL: [DiscountKind; 3] = [
        DiscountKind::StackAndSave,
        DiscountKind::Student,
        DiscountKind::WordleBonus,
    ];

    /// Stable key used in serialized summaries.
    pub const fn key(&self) -> &'static str {
        match self {
            DiscountKind::StackAndSave => "stack_n_save",
            DiscountKind::Student => "student",
            DiscountKind::WordleBonus => "wordle",
        }
    }

    /// Human label shown next to the rate ("Stack N Save: 15%").
    pub const fn label(&self) -> &'static str {
        match self {
            DiscountKind::StackAndSave => "Stack N Save",
            DiscountKind::Student => "Student",
            DiscountKind::WordleBonus => "Wordle",
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// A line in the cart.
///
/// ## Invariants
/// - `quantity >= 1`
/// - `line_total == unit_price × quantity`
/// - Never mutated after construction; lines are only added or removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Preset name, or "Custom Waffle".
    pub name: String,

    /// Free-text description ("Classic Waffle, Milo").
    pub details: String,

    /// Price per unit (rounded to the cent for batches).
    pub unit_price: Money,

    /// Units on this line.
    pub quantity: i64,

    /// `unit_price × quantity`; what the subtotal sums.
    pub line_total: Money,

    /// Exact price quoted before the per-unit rounding. This is the
    /// batch line total a customer is quoted; `unit_price` is the stored
    /// per-waffle price derived from it.
    pub quoted_total: Money,
}

impl CartLineItem {
    /// Creates a line whose quoted price is exactly `unit_price × quantity`.
    pub fn new(
        name: impl Into<String>,
        details: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Self {
        let line_total = unit_price.multiply_quantity(quantity);
        CartLineItem {
            name: name.into(),
            details: details.into(),
            unit_price,
            quantity,
            line_total,
            quoted_total: line_total,
        }
    }

    /// Creates a line from a batch total that may not split evenly.
    ///
    /// The unit price is `total / quantity` rounded to the cent and the line
    /// total is re-multiplied from it, so `line_total` can differ from
    /// `quoted_total` by a few cents.
    pub fn from_batch_total(
        name: impl Into<String>,
        details: impl Into<String>,
        batch_total: Money,
        quantity: i64,
    ) -> Self {
        let unit_price = batch_total.per_unit(quantity);
        let mut item = CartLineItem::new(name, details, unit_price, quantity);
        item.quoted_total = batch_total;
        item
    }

    /// Checks whether this line counts toward the waffle tally.
    ///
    /// Matches "waffle" anywhere in the name or details, ignoring case.
    pub fn is_waffle(&self) -> bool {
        self.name.to_lowercase().contains("waffle") || self.details.to_lowercase().contains("waffle")
    }
}

// =============================================================================
// Page
// =============================================================================

/// Navigation page of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Order,
    Wordle,
    Checkout,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Home => write!(f, "home"),
            Page::Order => write!(f, "order"),
            Page::Wordle => write!(f, "wordle"),
            Page::Checkout => write!(f, "checkout"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
