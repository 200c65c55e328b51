//! # Catalog State
//!
//! The menu and custom-waffle pricing. Read-only after startup.

use serde::Serialize;
use waffle_core::catalog::PriceCatalog;
use waffle_core::pricing::WafflePricing;

use super::config::KioskConfig;

/// Menu data shared by every command.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogState {
    pub catalog: PriceCatalog,
    pub pricing: WafflePricing,
}

impl CatalogState {
    pub fn new(catalog: PriceCatalog, pricing: WafflePricing) -> Self {
        CatalogState { catalog, pricing }
    }

    /// Standard menu with batch pricing from config.
    pub fn from_config(config: &KioskConfig) -> Self {
        Self::new(PriceCatalog::standard(), config.waffle_pricing())
    }
}
