//! # Discount Engine
//!
//! Automatic and manual discount rules and how they combine.
//!
//! ## Discount Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Kind            Trigger                              Rate              │
//! │  ─────────────   ──────────────────────────────────   ───────────────   │
//! │  Stack N Save    waffle units in cart (automatic)     2 → 5%            │
//! │                                                       3-4 → 10%         │
//! │                                                       5+ → 15%          │
//! │  Student         valid 7-digit code starting "10"     5%                │
//! │  Wordle          word game won                        10%               │
//! │                                                                         │
//! │  Combined = SUM of active rates, applied once to the subtotal.          │
//! │  15% + 5% + 10% = 30% off, NOT 1 - (0.85 × 0.95 × 0.90).                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The sum is not capped at 100%.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CartLineItem, DiscountKind, DiscountRate};
use crate::validation::check_student_code;

/// Rate granted for a valid student code.
pub const STUDENT_DISCOUNT: DiscountRate = DiscountRate::from_percent(5);

/// Rate granted for winning the word game.
pub const WORDLE_DISCOUNT: DiscountRate = DiscountRate::from_percent(10);

// =============================================================================
// Tier Policy
// =============================================================================

/// What happens to Stack N Save when the waffle count drops below 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierPolicy {
    /// The tier always matches the current cart; a count of 0 or 1 removes
    /// it, and removing a line re-evaluates.
    #[default]
    Recompute,

    /// Legacy kiosk behavior: a count of 0 or 1 leaves any earlier tier in
    /// place, and removing a line does not re-evaluate.
    Sticky,
}

impl fmt::Display for TierPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierPolicy::Recompute => write!(f, "recompute"),
            TierPolicy::Sticky => write!(f, "sticky"),
        }
    }
}

impl FromStr for TierPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recompute" => Ok(TierPolicy::Recompute),
            "sticky" | "legacy" => Ok(TierPolicy::Sticky),
            other => Err(ValidationError::InvalidFormat {
                field: "tier_policy".to_string(),
                reason: format!("unknown policy '{}', expected recompute or sticky", other),
            }),
        }
    }
}

// =============================================================================
// Stack N Save
// =============================================================================

/// Counts waffle units: quantities of lines mentioning "waffle".
pub fn count_waffle_units(items: &[CartLineItem]) -> i64 {
    items
        .iter()
        .filter(|item| item.is_waffle())
        .map(|item| item.quantity)
        .sum()
}

/// The Stack N Save tier for a waffle count, if any.
///
/// ## Example
/// ```rust
/// use waffle_core::discount::stack_and_save_rate;
///
/// assert_eq!(stack_and_save_rate(1), None);
/// assert_eq!(stack_and_save_rate(2).unwrap().percent(), 5);
/// assert_eq!(stack_and_save_rate(4).unwrap().percent(), 10);
/// assert_eq!(stack_and_save_rate(9).unwrap().percent(), 15);
/// ```
pub fn stack_and_save_rate(waffle_count: i64) -> Option<DiscountRate> {
    match waffle_count {
        c if c >= 5 => Some(DiscountRate::from_percent(15)),
        3 | 4 => Some(DiscountRate::from_percent(10)),
        2 => Some(DiscountRate::from_percent(5)),
        _ => None,
    }
}

/// Recomputes Stack N Save for the given cart lines.
///
/// Recomputed from scratch on every call; under [`TierPolicy::Sticky`] a
/// count below 2 leaves the existing entry alone.
pub fn evaluate_automatic_discounts(
    items: &[CartLineItem],
    discounts: &mut DiscountSet,
    policy: TierPolicy,
) {
    let waffle_count = count_waffle_units(items);

    match stack_and_save_rate(waffle_count) {
        Some(rate) => {
            debug!(waffle_count, rate = rate.bps(), "Stack N Save tier");
            discounts.set(DiscountKind::StackAndSave, rate);
        }
        None => match policy {
            TierPolicy::Recompute => {
                if discounts.remove(DiscountKind::StackAndSave).is_some() {
                    debug!(waffle_count, "Stack N Save dropped");
                }
            }
            TierPolicy::Sticky => {}
        },
    }
}

// =============================================================================
// Discount Set
// =============================================================================

/// One active discount, ready for the order summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ActiveDiscount {
    pub kind: DiscountKind,
    pub label: String,
    pub percent: u32,
}

impl fmt::Display for ActiveDiscount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}%", self.label, self.percent)
    }
}

/// The discounts held by a session, at most one per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountSet {
    rates: BTreeMap<DiscountKind, DiscountRate>,
}

impl DiscountSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rate for a kind, replacing any earlier one.
    pub fn set(&mut self, kind: DiscountKind, rate: DiscountRate) {
        self.rates.insert(kind, rate);
    }

    pub fn remove(&mut self, kind: DiscountKind) -> Option<DiscountRate> {
        self.rates.remove(&kind)
    }

    pub fn get(&self, kind: DiscountKind) -> Option<DiscountRate> {
        self.rates.get(&kind).copied()
    }

    pub fn contains(&self, kind: DiscountKind) -> bool {
        self.rates.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn clear(&mut self) {
        self.rates.clear();
    }

    /// Sum of every rate held.
    pub fn total_rate(&self) -> DiscountRate {
        self.rates.values().copied().sum()
    }

    /// `subtotal × (1 - sum of rates)`, unclamped.
    ///
    /// ## Example
    /// ```rust
    /// use waffle_core::discount::DiscountSet;
    /// use waffle_core::money::Money;
    ///
    /// let discounts = DiscountSet::new();
    /// assert_eq!(discounts.apply_discounts(Money::from_cents(400)).cents(), 400);
    /// ```
    pub fn apply_discounts(&self, subtotal: Money) -> Money {
        subtotal.apply_discount(self.total_rate())
    }

    /// Combined rate as a whole percent, for display.
    pub fn combined_rate_percent(&self) -> u32 {
        self.total_rate().percent()
    }

    /// Non-zero discounts in display order.
    pub fn active_discounts(&self) -> Vec<ActiveDiscount> {
        self.rates
            .iter()
            .filter(|(_, rate)| !rate.is_zero())
            .map(|(kind, rate)| ActiveDiscount {
                kind: *kind,
                label: kind.label().to_string(),
                percent: rate.percent(),
            })
            .collect()
    }

    /// Grants the word-game bonus.
    pub fn record_wordle_win(&mut self) {
        info!("Wordle bonus recorded");
        self.set(DiscountKind::WordleBonus, WORDLE_DISCOUNT);
    }

    /// Grants the student discount if `code` is valid.
    ///
    /// ## Returns
    /// Whether the discount was applied. An invalid code leaves the set
    /// untouched, including any student discount applied earlier.
    pub fn apply_student_code(&mut self, code: &str) -> bool {
        match check_student_code(code) {
            Ok(_) => {
                info!("Student discount applied");
                self.set(DiscountKind::Student, STUDENT_DISCOUNT);
                true
            }
            Err(e) => {
                warn!(reason = %e, "Invalid student code");
                false
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(qty: i64) -> CartLineItem {
        CartLineItem::new("Custom Waffle", format!("{}x waffle with no toppings", qty), Money::from_cents(200), qty)
    }

    fn drink() -> CartLineItem {
        CartLineItem::new("Milkshake", "Choc Milkshake", Money::from_cents(200), 3)
    }

    #[test]
    fn test_count_waffle_units_by_quantity() {
        let items = vec![custom(2), drink(), custom(1)];
        assert_eq!(count_waffle_units(&items), 3);
    }

    #[test]
    fn test_two_waffles_give_five_percent() {
        let mut discounts = DiscountSet::new();
        evaluate_automatic_discounts(&[custom(1), custom(1)], &mut discounts, TierPolicy::Recompute);
        assert_eq!(discounts.get(DiscountKind::StackAndSave), Some(DiscountRate::from_percent(5)));

        let mut discounts = DiscountSet::new();
        evaluate_automatic_discounts(&[custom(2)], &mut discounts, TierPolicy::Recompute);
        assert_eq!(discounts.get(DiscountKind::StackAndSave), Some(DiscountRate::from_percent(5)));
    }

    #[test]
    fn test_five_waffles_give_fifteen_percent() {
        let mut discounts = DiscountSet::new();
        evaluate_automatic_discounts(&[custom(4), custom(1)], &mut discounts, TierPolicy::Recompute);
        assert_eq!(discounts.get(DiscountKind::StackAndSave), Some(DiscountRate::from_percent(15)));
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let items = vec![custom(3)];
        let mut discounts = DiscountSet::new();
        evaluate_automatic_discounts(&items, &mut discounts, TierPolicy::Recompute);
        evaluate_automatic_discounts(&items, &mut discounts, TierPolicy::Recompute);
        assert_eq!(discounts.total_rate(), DiscountRate::from_percent(10));
    }

    #[test]
    fn test_tier_lowers_when_count_shrinks() {
        let mut discounts = DiscountSet::new();
        evaluate_automatic_discounts(&[custom(4), custom(1)], &mut discounts, TierPolicy::Sticky);
        evaluate_automatic_discounts(&[custom(2)], &mut discounts, TierPolicy::Sticky);
        // A lower matching tier still overwrites, even when sticky
        assert_eq!(discounts.get(DiscountKind::StackAndSave), Some(DiscountRate::from_percent(5)));
    }

    #[test]
    fn test_recompute_clears_below_threshold() {
        let mut discounts = DiscountSet::new();
        evaluate_automatic_discounts(&[custom(3)], &mut discounts, TierPolicy::Recompute);
        evaluate_automatic_discounts(&[custom(1)], &mut discounts, TierPolicy::Recompute);
        assert!(!discounts.contains(DiscountKind::StackAndSave));
    }

    #[test]
    fn test_sticky_keeps_stale_tier() {
        let mut discounts = DiscountSet::new();
        evaluate_automatic_discounts(&[custom(3)], &mut discounts, TierPolicy::Sticky);
        evaluate_automatic_discounts(&[], &mut discounts, TierPolicy::Sticky);
        assert_eq!(discounts.get(DiscountKind::StackAndSave), Some(DiscountRate::from_percent(10)));
    }

    #[test]
    fn test_recompute_leaves_other_kinds_alone() {
        let mut discounts = DiscountSet::new();
        discounts.record_wordle_win();
        evaluate_automatic_discounts(&[], &mut discounts, TierPolicy::Recompute);
        assert_eq!(discounts.get(DiscountKind::WordleBonus), Some(WORDLE_DISCOUNT));
    }

    #[test]
    fn test_rates_sum_not_compound() {
        let mut discounts = DiscountSet::new();
        discounts.set(DiscountKind::StackAndSave, DiscountRate::from_percent(15));
        assert!(discounts.apply_student_code("1012345"));
        discounts.record_wordle_win();

        assert_eq!(discounts.combined_rate_percent(), 30);
        assert_eq!(discounts.apply_discounts(Money::from_cents(1000)).cents(), 700);
    }

    #[test]
    fn test_reapplying_a_kind_overwrites() {
        let mut discounts = DiscountSet::new();
        assert!(discounts.apply_student_code("1012345"));
        assert!(discounts.apply_student_code("1099999"));
        assert_eq!(discounts.total_rate(), STUDENT_DISCOUNT);
    }

    #[test]
    fn test_invalid_student_code_changes_nothing() {
        let mut discounts = DiscountSet::new();
        assert!(!discounts.apply_student_code("2012345"));
        assert!(discounts.is_empty());
    }

    #[test]
    fn test_empty_set_leaves_subtotal_unchanged() {
        let discounts = DiscountSet::new();
        assert_eq!(discounts.apply_discounts(Money::from_cents(1234)).cents(), 1234);
        assert_eq!(discounts.combined_rate_percent(), 0);
    }

    #[test]
    fn test_sum_is_not_clamped() {
        let mut discounts = DiscountSet::new();
        discounts.set(DiscountKind::StackAndSave, DiscountRate::from_percent(80));
        discounts.set(DiscountKind::Student, DiscountRate::from_percent(40));
        assert_eq!(discounts.apply_discounts(Money::from_cents(1000)).cents(), -200);
    }

    #[test]
    fn test_active_discounts_skip_zero_rates() {
        let mut discounts = DiscountSet::new();
        discounts.set(DiscountKind::StackAndSave, DiscountRate::zero());
        discounts.record_wordle_win();

        let active = discounts.active_discounts();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].to_string(), "Wordle: 10%");
    }

    #[test]
    fn test_tier_policy_parsing() {
        assert_eq!("recompute".parse::<TierPolicy>().unwrap(), TierPolicy::Recompute);
        assert_eq!("Sticky".parse::<TierPolicy>().unwrap(), TierPolicy::Sticky);
        assert!("sometimes".parse::<TierPolicy>().is_err());
    }
}
