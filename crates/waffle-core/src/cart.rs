//! # Cart Store
//!
//! The ordered list of cart lines plus the discounts that ride along with
//! them.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CartStore Operations                               │
//! │                                                                         │
//! │  add_item(line) ─────► items.push(line) ──► re-evaluate Stack N Save    │
//! │                                                                         │
//! │  remove_item(i) ─────► items.remove(i) ───► re-evaluate (Recompute only)│
//! │                                                                         │
//! │  clear() ────────────► items.clear() + discounts.clear()                │
//! │                                                                         │
//! │  subtotal() ─────────► Σ line_total                                     │
//! │  final_total() ──────► subtotal × (1 - Σ rates)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are never merged: adding the same preset twice gives two lines.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::discount::{evaluate_automatic_discounts, DiscountSet, TierPolicy};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::cart_subtotal;
use crate::types::CartLineItem;

/// Cart lines and the discounts attached to them.
///
/// ## Invariants
/// - Insertion order is preserved
/// - After every add (and every remove under [`TierPolicy::Recompute`])
///   the Stack N Save entry matches the current waffle count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartStore {
    items: Vec<CartLineItem>,
    discounts: DiscountSet,
    policy: TierPolicy,
}

impl CartStore {
    /// Creates an empty cart.
    pub fn new(policy: TierPolicy) -> Self {
        CartStore {
            items: Vec::new(),
            discounts: DiscountSet::new(),
            policy,
        }
    }

    pub fn policy(&self) -> TierPolicy {
        self.policy
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn discounts(&self) -> &DiscountSet {
        &self.discounts
    }

    /// Mutable access for discounts granted outside the cart
    /// (student codes, word-game wins).
    pub fn discounts_mut(&mut self) -> &mut DiscountSet {
        &mut self.discounts
    }

    /// Appends a line and re-evaluates Stack N Save.
    pub fn add_item(&mut self, item: CartLineItem) {
        debug!(
            name = %item.name,
            quantity = item.quantity,
            line_total = item.line_total.cents(),
            "Cart line added"
        );
        self.items.push(item);
        evaluate_automatic_discounts(&self.items, &mut self.discounts, self.policy);
    }

    /// Removes the line at `index`.
    ///
    /// ## Errors
    /// [`CoreError::ItemNotFound`] when `index` is out of range. The cart
    /// is left unchanged.
    pub fn remove_item(&mut self, index: usize) -> CoreResult<CartLineItem> {
        if index >= self.items.len() {
            return Err(CoreError::ItemNotFound {
                index,
                len: self.items.len(),
            });
        }

        let removed = self.items.remove(index);
        debug!(index, name = %removed.name, "Cart line removed");

        if self.policy == TierPolicy::Recompute {
            evaluate_automatic_discounts(&self.items, &mut self.discounts, self.policy);
        }

        Ok(removed)
    }

    /// Empties the cart and drops every discount.
    pub fn clear(&mut self) {
        self.items.clear();
        self.discounts.clear();
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Money {
        cart_subtotal(&self.items)
    }

    /// Subtotal after every active discount.
    pub fn final_total(&self) -> Money {
        self.discounts.apply_discounts(self.subtotal())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PriceCatalog;
    use crate::pricing::{quote_custom_waffle, CustomWaffleOrder, WafflePricing};
    use crate::types::DiscountKind;

    fn custom(quantity: i64) -> CartLineItem {
        let order = CustomWaffleOrder {
            quantity,
            ..CustomWaffleOrder::default()
        };
        quote_custom_waffle(&PriceCatalog::standard(), &WafflePricing::default(), &order)
            .unwrap()
            .line_item
    }

    #[test]
    fn test_add_and_subtotal() {
        let catalog = PriceCatalog::standard();
        let mut cart = CartStore::new(TierPolicy::Recompute);

        cart.add_item(catalog.preset_line_item("Milo Meal").unwrap());
        cart.add_item(catalog.preset_line_item("Milo Meal").unwrap());

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.subtotal().cents(), 800);
    }

    #[test]
    fn test_remove_out_of_range_leaves_cart_alone() {
        let catalog = PriceCatalog::standard();
        let mut cart = CartStore::new(TierPolicy::Recompute);
        cart.add_item(catalog.preset_line_item("Milo Meal").unwrap());

        let err = cart.remove_item(3).unwrap_err();
        assert!(matches!(err, CoreError::ItemNotFound { index: 3, len: 1 }));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_stack_and_save_follows_adds() {
        let mut cart = CartStore::new(TierPolicy::Recompute);

        cart.add_item(custom(2));
        assert_eq!(cart.discounts().get(DiscountKind::StackAndSave).unwrap().percent(), 5);

        cart.add_item(custom(3));
        assert_eq!(cart.discounts().get(DiscountKind::StackAndSave).unwrap().percent(), 15);
    }

    #[test]
    fn test_remove_reevaluates_under_recompute() {
        let mut cart = CartStore::new(TierPolicy::Recompute);
        cart.add_item(custom(2));
        cart.add_item(custom(1));

        cart.remove_item(0).unwrap();
        assert!(!cart.discounts().contains(DiscountKind::StackAndSave));
    }

    #[test]
    fn test_remove_keeps_tier_under_sticky() {
        let mut cart = CartStore::new(TierPolicy::Sticky);
        cart.add_item(custom(4));
        cart.remove_item(0).unwrap();

        assert!(cart.is_empty());
        assert_eq!(cart.discounts().get(DiscountKind::StackAndSave).unwrap().percent(), 10);
    }

    #[test]
    fn test_add_then_remove_restores_state() {
        let catalog = PriceCatalog::standard();
        let mut cart = CartStore::new(TierPolicy::Recompute);
        cart.add_item(custom(2));
        let before = cart.clone();

        cart.add_item(catalog.preset_line_item("Berry Blast").unwrap());
        cart.remove_item(1).unwrap();

        assert_eq!(cart, before);
    }

    #[test]
    fn test_discounts_apply_to_final_total() {
        let catalog = PriceCatalog::standard();
        let mut cart = CartStore::new(TierPolicy::Recompute);
        cart.add_item(catalog.preset_line_item("Milo Meal").unwrap());
        cart.discounts_mut().record_wordle_win();
        assert!(cart.discounts_mut().apply_student_code("1012345"));

        // 400 less 15%
        assert_eq!(cart.final_total().cents(), 340);
    }

    #[test]
    fn test_clear_drops_items_and_discounts() {
        let mut cart = CartStore::new(TierPolicy::Recompute);
        cart.add_item(custom(3));
        cart.discounts_mut().record_wordle_win();

        cart.clear();

        assert!(cart.is_empty());
        assert!(cart.discounts().is_empty());
        assert_eq!(cart.final_total(), Money::zero());
    }
}
