//! # Checkout Commands
//!
//! Placing the order and starting over.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Complete Checkout                                    │
//! │                                                                         │
//! │  1. Cart empty? ──── yes ──► VALIDATION_ERROR "Cart is empty."          │
//! │         │                                                               │
//! │         no                                                              │
//! │         ▼                                                               │
//! │  2. Snapshot lines + totals into a Receipt (order id, timestamp)        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  3. session.clear_order(): cart, discounts, wordle round                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  4. Return the receipt (page stays on Checkout)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No payment is taken.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;
use waffle_core::{CartLineItem, CoreError, Money, Page};

use crate::commands::discount::OrderSummary;
use crate::error::ApiError;
use crate::state::{KioskConfig, SessionState};

/// What the customer sees after placing an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub order_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub store_name: String,
    pub lines: Vec<CartLineItem>,
    pub summary: OrderSummary,
    pub final_total: Money,

    /// Display form of `final_total`.
    pub formatted_total: String,

    pub message: String,

    /// Always true: the cart, discounts and word game were cleared.
    pub clears_cart_and_discounts: bool,
}

/// Result of `reset_all` and `navigate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub page: Page,
}

/// Places the order.
///
/// ## Errors
/// `VALIDATION_ERROR` on an empty cart; nothing is cleared.
pub fn complete_checkout(session: &SessionState, config: &KioskConfig) -> Result<Receipt, ApiError> {
    debug!("complete_checkout command");

    session.with_session_mut(|s| {
        if s.cart.is_empty() {
            return Err(ApiError::from(CoreError::EmptyCart));
        }

        let summary = OrderSummary::from(&*s);
        let receipt = Receipt {
            order_id: Uuid::new_v4(),
            completed_at: Utc::now(),
            store_name: config.store.name.clone(),
            lines: s.cart.items().to_vec(),
            final_total: summary.final_total,
            formatted_total: config.format_currency(summary.final_total.cents()),
            summary,
            message: "✅ Order placed successfully!".to_string(),
            clears_cart_and_discounts: true,
        };

        s.clear_order();

        info!(
            order_id = %receipt.order_id,
            lines = receipt.lines.len(),
            final_total = receipt.final_total.cents(),
            "Order placed"
        );

        Ok(receipt)
    })
}

/// Clears everything and returns to Home.
pub fn reset_all(session: &SessionState) -> PageResponse {
    debug!("reset_all command");

    session.with_session_mut(|s| {
        s.reset();
        info!("Session reset");
        PageResponse { page: s.page }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use waffle_core::catalog::PriceCatalog;

    fn session_with_milo_meal() -> SessionState {
        let state = SessionState::default();
        let item = PriceCatalog::standard().preset_line_item("Milo Meal").unwrap();
        state.with_session_mut(|s| s.cart.add_item(item));
        state
    }

    #[test]
    fn test_checkout_single_preset() {
        let state = session_with_milo_meal();
        state.with_session_mut(|s| s.page = Page::Checkout);

        let receipt = complete_checkout(&state, &KioskConfig::default()).unwrap();

        assert_eq!(receipt.summary.subtotal.cents(), 400);
        assert_eq!(receipt.final_total.cents(), 400);
        assert_eq!(receipt.formatted_total, "$4.00");
        assert_eq!(receipt.lines.len(), 1);
        assert!(receipt.clears_cart_and_discounts);

        state.with_session(|s| {
            assert!(s.cart.is_empty());
            assert!(s.discounts().is_empty());
            assert_eq!(s.page, Page::Checkout);
        });
    }

    #[test]
    fn test_checkout_empty_cart() {
        let state = SessionState::default();
        state.with_session_mut(|s| s.discounts_mut().record_wordle_win());

        let err = complete_checkout(&state, &KioskConfig::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        // nothing cleared on failure
        assert!(!state.with_session(|s| s.discounts().is_empty()));
    }

    #[test]
    fn test_order_ids_are_unique() {
        let state = session_with_milo_meal();
        let a = complete_checkout(&state, &KioskConfig::default()).unwrap();

        let item = PriceCatalog::standard().preset_line_item("Milo Meal").unwrap();
        state.with_session_mut(|s| s.cart.add_item(item));
        let b = complete_checkout(&state, &KioskConfig::default()).unwrap();

        assert_ne!(a.order_id, b.order_id);
    }

    #[test]
    fn test_reset_all() {
        let state = session_with_milo_meal();
        state.with_session_mut(|s| {
            s.page = Page::Order;
            s.discounts_mut().apply_student_code("1012345");
        });

        let resp = reset_all(&state);

        assert_eq!(resp.page, Page::Home);
        state.with_session(|s| {
            assert!(s.cart.is_empty());
            assert!(s.discounts().is_empty());
        });
    }
}
