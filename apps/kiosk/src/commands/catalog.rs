//! # Catalog Commands
//!
//! Read-only menu and store information for building the order screen.

use serde::Serialize;
use tracing::debug;
use waffle_core::catalog::{ComponentPrices, PresetCombo, PriceTable};
use waffle_core::pricing::WafflePricing;
use waffle_core::{MAX_CUSTOM_QUANTITY, MAX_SYRUPS, MAX_TOPPINGS};

use crate::state::{CatalogState, KioskConfig};

/// The menu plus the limits the order screen enforces.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub presets: Vec<PresetCombo>,
    pub component_prices: ComponentPrices,
    pub drink_prices: PriceTable,

    /// Fruits and ice creams merged, as offered in the topping picker.
    pub toppings: PriceTable,

    pub waffle_pricing: WafflePricing,
    pub max_toppings: usize,
    pub max_syrups: usize,
    pub max_quantity: i64,
}

/// Store settings the UI needs for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub store_name: String,
    pub currency_symbol: String,
    pub tier_policy: String,
    pub seeded_wordle: bool,
}

/// Gets the full menu.
pub fn get_catalog(catalog: &CatalogState) -> CatalogResponse {
    debug!("get_catalog command");

    let menu = &catalog.catalog;
    CatalogResponse {
        presets: menu.presets.clone(),
        component_prices: menu.component_prices.clone(),
        drink_prices: menu.drink_prices.clone(),
        toppings: menu.toppings(),
        waffle_pricing: catalog.pricing,
        max_toppings: MAX_TOPPINGS,
        max_syrups: MAX_SYRUPS,
        max_quantity: MAX_CUSTOM_QUANTITY,
    }
}

pub fn get_config(config: &KioskConfig) -> ConfigResponse {
    debug!("get_config command");

    ConfigResponse {
        store_name: config.store.name.clone(),
        currency_symbol: config.store.currency_symbol.clone(),
        tier_policy: config.discounts.tier_policy.to_string(),
        seeded_wordle: config.wordle.seed.is_some(),
    }
}
