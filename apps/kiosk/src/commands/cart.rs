//! # Cart Commands
//!
//! Commands for building the order.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Placed  │       │
//! │  │  Cart    │     │          │     │   Page   │     │  Order   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 │              │
//! │                   add_preset                     complete_checkout     │
//! │                   add_custom_waffle              (checkout.rs)         │
//! │                   remove_cart_item                       │              │
//! │                        │                                 ▼              │
//! │                   reset_all ─────────────────────► (back to empty)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation re-evaluates Stack N Save inside the cart store, so the
//! discounts in a response always match its lines.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;
use waffle_core::pricing::{quote_custom_waffle, CustomWaffleOrder};
use waffle_core::{CartLineItem, Money};

use crate::error::ApiError;
use crate::state::{CatalogState, KioskConfig, Session, SessionState};

/// Cart response including lines and subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub item_count: usize,
    pub subtotal: Money,

    /// Non-fatal messages for the customer ("Custom waffle added to cart!",
    /// truncated selections). Empty when there is nothing to say.
    #[serde(default)]
    pub notices: Vec<String>,
}

impl From<&Session> for CartResponse {
    fn from(session: &Session) -> Self {
        CartResponse {
            items: session.cart.items().to_vec(),
            item_count: session.cart.len(),
            subtotal: session.cart.subtotal(),
            notices: Vec::new(),
        }
    }
}

impl CartResponse {
    fn with_notices(mut self, notices: Vec<String>) -> Self {
        self.notices = notices;
        self
    }
}

/// Subtotal before discounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SubtotalResponse {
    pub subtotal: Money,
    pub formatted: String,
}

/// Gets the current cart contents.
pub fn get_cart(session: &SessionState) -> CartResponse {
    debug!("get_cart command");
    session.with_session(|s| CartResponse::from(s))
}

/// Adds one preset combo to the cart.
///
/// ## Errors
/// `NOT_FOUND` if the name is not on the menu; the cart is untouched.
pub fn add_preset(
    session: &SessionState,
    catalog: &CatalogState,
    name: &str,
) -> Result<CartResponse, ApiError> {
    debug!(name = %name, "add_preset command");

    let item = catalog.catalog.preset_line_item(name)?;

    Ok(session.with_session_mut(|s| {
        s.cart.add_item(item);
        CartResponse::from(&*s).with_notices(vec![format!("{} added to cart!", name)])
    }))
}

/// Prices and adds a build-your-own waffle.
///
/// ## Behavior
/// - Quantity outside 1..=4: `VALIDATION_ERROR`, nothing added
/// - More than 3 toppings or 2 syrups: extras dropped, notice returned
/// - Unknown drink: charged nothing, notice returned
pub fn add_custom_waffle(
    session: &SessionState,
    catalog: &CatalogState,
    order: &CustomWaffleOrder,
) -> Result<CartResponse, ApiError> {
    debug!(
        quantity = order.quantity,
        toppings = order.toppings.len(),
        syrups = order.syrups.len(),
        drink = %order.drink,
        "add_custom_waffle command"
    );

    let quote = quote_custom_waffle(&catalog.catalog, &catalog.pricing, order)?;

    let mut notices: Vec<String> = quote.warnings.iter().map(|w| format!("⚠️ {}.", w)).collect();
    notices.push("Custom waffle added to cart!".to_string());

    Ok(session.with_session_mut(|s| {
        s.cart.add_item(quote.line_item);
        CartResponse::from(&*s).with_notices(notices)
    }))
}

/// Removes the line at `index` (0-based).
///
/// ## Errors
/// `CART_ERROR` for an index past the end; the cart is untouched.
pub fn remove_cart_item(session: &SessionState, index: usize) -> Result<CartResponse, ApiError> {
    debug!(index, "remove_cart_item command");

    session.with_session_mut(|s| {
        s.cart.remove_item(index).map_err(|e| {
            warn!(index, "Remove of missing cart line");
            ApiError::from(e)
        })?;
        Ok(CartResponse::from(&*s))
    })
}

/// Sum of line totals, before discounts.
pub fn get_cart_subtotal(session: &SessionState, config: &KioskConfig) -> SubtotalResponse {
    debug!("get_cart_subtotal command");

    let subtotal = session.with_session(|s| s.cart.subtotal());
    SubtotalResponse {
        subtotal,
        formatted: config.format_currency(subtotal.cents()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn setup() -> (SessionState, CatalogState) {
        (SessionState::default(), CatalogState::default())
    }

    #[test]
    fn test_add_preset() {
        let (session, catalog) = setup();

        let cart = add_preset(&session, &catalog, "Chocolate Heaven").unwrap();
        assert_eq!(cart.item_count, 1);
        assert_eq!(cart.subtotal.cents(), 450);
        assert_eq!(cart.notices, vec!["Chocolate Heaven added to cart!".to_string()]);
    }

    #[test]
    fn test_add_unknown_preset() {
        let (session, catalog) = setup();

        let err = add_preset(&session, &catalog, "Pancake Stack").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(get_cart(&session).items.is_empty());
    }

    #[test]
    fn test_add_custom_waffle_truncates_with_notice() {
        let (session, catalog) = setup();
        let order = CustomWaffleOrder {
            quantity: 1,
            toppings: ["Banana", "Strawberry", "Blueberry", "Cherry"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ..CustomWaffleOrder::default()
        };

        let cart = add_custom_waffle(&session, &catalog, &order).unwrap();

        // 200 + Banana 100 + Strawberry 150 (ice-cream price) + Blueberry 100
        assert_eq!(cart.subtotal.cents(), 550);
        assert_eq!(cart.notices.len(), 2);
        assert!(cart.notices[0].contains("up to 3 toppings"));
    }

    #[test]
    fn test_add_custom_waffle_rejects_bad_quantity() {
        let (session, catalog) = setup();
        let order = CustomWaffleOrder {
            quantity: 5,
            ..CustomWaffleOrder::default()
        };

        let err = add_custom_waffle(&session, &catalog, &order).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(get_cart(&session).items.is_empty());
    }

    #[test]
    fn test_remove_cart_item() {
        let (session, catalog) = setup();
        add_preset(&session, &catalog, "Milo Meal").unwrap();

        let cart = remove_cart_item(&session, 0).unwrap();
        assert!(cart.items.is_empty());
        assert_eq!(cart.subtotal, Money::zero());

        let err = remove_cart_item(&session, 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_get_cart_subtotal_formats() {
        let (session, catalog) = setup();
        add_preset(&session, &catalog, "Berry Blast").unwrap();

        let subtotal = get_cart_subtotal(&session, &KioskConfig::default());
        assert_eq!(subtotal.formatted, "$4.50");
    }

    #[test]
    fn test_cart_response_always_has_notices() {
        let (session, _) = setup();
        let json = serde_json::to_value(get_cart(&session)).unwrap();
        assert_eq!(json["notices"], serde_json::json!([]));
    }
}
