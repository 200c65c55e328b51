//! # Pricing Engine
//!
//! Line-item and cart totals.
//!
//! ## Custom Waffle Pricing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  3 waffles, Banana + Oreo, Maple, Milo                                  │
//! │                                                                         │
//! │  Batch:     $2.00 + $1.80 + $1.60           = $5.40                     │
//! │  Toppings:  $1.00 + $2.00                   = $3.00  (once per order)   │
//! │  Syrups:    $0.50                           = $0.50  (once per order)   │
//! │  Drink:     $2.00                           = $2.00  (once per order)   │
//! │  ──────────────────────────────────────────────────                     │
//! │  Quoted total                               = $10.90                    │
//! │  Unit price $10.90 / 3 = $3.633.. → $3.63                               │
//! │  Line total $3.63 × 3                       = $10.89                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! The cart bills the line total; the quoted total is kept on the line for
//! display.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::catalog::{PriceCatalog, PriceTable};
use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::CartLineItem;
use crate::validation::validate_custom_quantity;
use crate::{MAX_SYRUPS, MAX_TOPPINGS, WAFFLE_BASE_PRICE, WAFFLE_DECAY_PER_UNIT};

// =============================================================================
// Primitive Calculations
// =============================================================================

/// Sums the prices of the selected names found in `table`.
///
/// Names missing from the table add nothing.
///
/// ## Example
/// ```rust
/// use waffle_core::catalog::PriceCatalog;
/// use waffle_core::pricing::price_of_selection;
///
/// let syrups = PriceCatalog::standard().component_prices.syrups;
/// let total = price_of_selection(&["Maple", "Chocolate", "Ketchup"], &syrups);
/// assert_eq!(total.cents(), 125);
/// ```
pub fn price_of_selection<S: AsRef<str>>(selected: &[S], table: &PriceTable) -> Money {
    selected
        .iter()
        .filter_map(|name| {
            let name = name.as_ref();
            let price = table.get(name);
            if price.is_none() {
                debug!(name = %name, "Ignoring selection missing from price table");
            }
            price
        })
        .sum()
}

/// Prices a batch of waffles where each extra unit is cheaper.
///
/// The i-th waffle (from 0) costs `max(0, base - i × decay)`.
///
/// ## Example
/// ```rust
/// use waffle_core::money::Money;
/// use waffle_core::pricing::price_of_waffle_batch;
///
/// let base = Money::from_cents(200);
/// let decay = Money::from_cents(20);
/// assert_eq!(price_of_waffle_batch(1, base, decay).cents(), 200);
/// assert_eq!(price_of_waffle_batch(4, base, decay).cents(), 680);
/// ```
pub fn price_of_waffle_batch(quantity: i64, base: Money, decay: Money) -> Money {
    (0..quantity.max(0))
        .map(|i| (base - decay * i).max(Money::zero()))
        .sum()
}

/// Sums `unit_price × quantity` over the cart.
pub fn cart_subtotal(items: &[CartLineItem]) -> Money {
    items
        .iter()
        .map(|item| item.unit_price.multiply_quantity(item.quantity))
        .sum()
}

// =============================================================================
// Selection Limits
// =============================================================================

/// A selection after applying a maximum count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitedSelection {
    /// The entries kept, in the order they were picked.
    pub items: Vec<String>,

    /// Set when entries past the limit were dropped.
    pub warning: Option<ValidationError>,
}

impl LimitedSelection {
    /// Checks if the selection was cut down.
    pub fn was_truncated(&self) -> bool {
        self.warning.is_some()
    }
}

/// Keeps the first `max_items` entries of `selected`.
///
/// Over-long selections are truncated, not rejected; the returned warning
/// is meant for the user.
///
/// ## Example
/// ```rust
/// use waffle_core::pricing::limit_selection;
///
/// let picked = vec!["Banana".to_string(), "Oreo".to_string(), "Vanilla".to_string()];
/// let limited = limit_selection(&picked, 2, "toppings");
/// assert_eq!(limited.items, vec!["Banana", "Oreo"]);
/// assert!(limited.was_truncated());
/// ```
pub fn limit_selection<S: AsRef<str>>(selected: &[S], max_items: usize, label: &str) -> LimitedSelection {
    let items: Vec<String> = selected
        .iter()
        .take(max_items)
        .map(|s| s.as_ref().to_string())
        .collect();

    let warning = if selected.len() > max_items {
        warn!(
            label = %label,
            selected = selected.len(),
            max = max_items,
            "Selection over limit, truncating"
        );
        Some(ValidationError::TooMany {
            field: label.to_string(),
            max: max_items,
        })
    } else {
        None
    };

    LimitedSelection { items, warning }
}

// =============================================================================
// Custom Waffles
// =============================================================================

/// Batch pricing parameters for custom waffles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WafflePricing {
    /// Price of the first waffle.
    pub base: Money,
    /// Reduction for each further waffle in the same order.
    pub decay: Money,
}

impl Default for WafflePricing {
    fn default() -> Self {
        WafflePricing {
            base: WAFFLE_BASE_PRICE,
            decay: WAFFLE_DECAY_PER_UNIT,
        }
    }
}

impl WafflePricing {
    /// Price of `quantity` waffles with no extras.
    pub fn batch(&self, quantity: i64) -> Money {
        price_of_waffle_batch(quantity, self.base, self.decay)
    }
}

/// A build-your-own order as picked on the order screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomWaffleOrder {
    pub quantity: i64,
    #[serde(default)]
    pub toppings: Vec<String>,
    #[serde(default)]
    pub syrups: Vec<String>,
    #[serde(default = "default_drink")]
    pub drink: String,
    #[serde(default)]
    pub batter: Option<String>,
}

fn default_drink() -> String {
    "None".to_string()
}

/// One plain waffle, no extras.
impl Default for CustomWaffleOrder {
    fn default() -> Self {
        CustomWaffleOrder {
            quantity: 1,
            toppings: Vec::new(),
            syrups: Vec::new(),
            drink: default_drink(),
            batter: None,
        }
    }
}

/// The priced result of a custom order.
#[derive(Debug, Clone)]
pub struct CustomWaffleQuote {
    /// Line ready to go into the cart.
    pub line_item: CartLineItem,

    /// Non-fatal issues found while pricing (truncated selections, unknown
    /// drink).
    pub warnings: Vec<ValidationError>,
}

/// Prices a custom waffle order against the catalog.
///
/// ## Steps
/// 1. Validate the batch size (1..=4)
/// 2. Truncate toppings to 3 and syrups to 2
/// 3. Batch price + toppings + syrups + drink + batter, extras charged once
/// 4. Split into a rounded unit price (see [`CartLineItem::from_batch_total`])
pub fn quote_custom_waffle(
    catalog: &PriceCatalog,
    pricing: &WafflePricing,
    order: &CustomWaffleOrder,
) -> CoreResult<CustomWaffleQuote> {
    validate_custom_quantity(order.quantity)?;

    let mut warnings = Vec::new();

    let toppings = limit_selection(&order.toppings, MAX_TOPPINGS, "toppings");
    let syrups = limit_selection(&order.syrups, MAX_SYRUPS, "syrups");

    let topping_total = price_of_selection(&toppings.items, &catalog.toppings());
    let syrup_total = price_of_selection(&syrups.items, &catalog.component_prices.syrups);

    warnings.extend(toppings.warning);
    warnings.extend(syrups.warning);

    let drink = if order.drink.trim().is_empty() {
        default_drink()
    } else {
        order.drink.trim().to_string()
    };
    let drink_price = match catalog.drink_prices.get(&drink) {
        Some(price) => price,
        None => {
            warn!(drink = %drink, "Unknown drink, charging nothing");
            warnings.push(ValidationError::InvalidFormat {
                field: "drink".to_string(),
                reason: format!("'{}' is not on the menu", drink),
            });
            Money::zero()
        }
    };

    let batter_price = order
        .batter
        .as_deref()
        .map(|b| price_of_selection(&[b], &catalog.component_prices.batters))
        .unwrap_or_default();

    let batch_total =
        pricing.batch(order.quantity) + topping_total + syrup_total + drink_price + batter_price;

    let details = custom_details(order.quantity, &toppings.items, &syrups.items, &drink, order.batter.as_deref());

    debug!(
        quantity = order.quantity,
        batch_total = %batch_total,
        "Quoted custom waffle"
    );

    Ok(CustomWaffleQuote {
        line_item: CartLineItem::from_batch_total("Custom Waffle", details, batch_total, order.quantity),
        warnings,
    })
}

/// "2x waffle with Banana, Oreo, Maple, Drink: Milo"
fn custom_details(
    quantity: i64,
    toppings: &[String],
    syrups: &[String],
    drink: &str,
    batter: Option<&str>,
) -> String {
    let toppings = if toppings.is_empty() {
        "no toppings".to_string()
    } else {
        toppings.join(", ")
    };
    let syrups = if syrups.is_empty() {
        "no syrup".to_string()
    } else {
        syrups.join(", ")
    };

    let mut details = format!("{}x waffle with {}, {}, Drink: {}", quantity, toppings, syrups, drink);
    if let Some(batter) = batter {
        details.push_str(&format!(", Batter: {}", batter));
    }
    details
}

// =============================================================================
// Unit Tests
// =============================================================================
