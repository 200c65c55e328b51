//! # Discount Commands
//!
//! Order summary and the student code.
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │  ORDER SUMMARY                                 │
//! │  Subtotal                         $13.00       │
//! │  Stack N Save: 10%                             │
//! │  Student: 5%                                   │
//! │  Discount (15%)                   -$1.95       │
//! │  ───────────────────────────────────────       │
//! │  TOTAL                            $11.05       │
//! └────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use waffle_core::discount::ActiveDiscount;
use waffle_core::Money;

use crate::state::{Session, SessionState};

/// Totals with every active discount applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub subtotal: Money,

    /// Sum of all active rates, as a whole percent.
    pub discount_percent: u32,

    /// `subtotal - final_total`.
    pub discount_amount: Money,

    /// Can go negative if the rates add up past 100%.
    pub final_total: Money,

    pub active_discounts: Vec<ActiveDiscount>,
}

impl From<&Session> for OrderSummary {
    fn from(session: &Session) -> Self {
        let subtotal = session.cart.subtotal();
        let final_total = session.cart.final_total();
        let discounts = session.discounts();

        OrderSummary {
            subtotal,
            discount_percent: discounts.combined_rate_percent(),
            discount_amount: subtotal - final_total,
            final_total,
            active_discounts: discounts.active_discounts(),
        }
    }
}

/// Result of entering a student code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StudentCodeResponse {
    pub applied: bool,
    pub message: String,
    pub summary: OrderSummary,
}

/// Gets subtotal, discounts and final total.
pub fn get_order_summary(session: &SessionState) -> OrderSummary {
    debug!("get_order_summary command");
    session.with_session(|s| OrderSummary::from(s))
}

/// Applies the 5% student discount if the code is valid.
///
/// An invalid code is not an error: `applied` is false and any student
/// discount granted earlier stays in place.
pub fn apply_student_code(session: &SessionState, code: &str) -> StudentCodeResponse {
    debug!("apply_student_code command");

    session.with_session_mut(|s| {
        let applied = s.discounts_mut().apply_student_code(code);
        let message = if applied {
            "Student discount applied (5%)"
        } else {
            "Invalid student code."
        };

        StudentCodeResponse {
            applied,
            message: message.to_string(),
            summary: OrderSummary::from(&*s),
        }
    })
}
