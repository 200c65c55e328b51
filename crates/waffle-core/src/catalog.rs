//! # Price Catalog
//!
//! Static menu data: preset combos, build-your-own components, drinks and
//! the word list for the mini-game.
//!
//! Tables keep menu order so the UI can list them as written.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::CartLineItem;

/// Secret words for the word game. All are five letters.
pub const WAFFLE_WORDS: [&str; 12] = [
    "SYRUP", "FRUIT", "SWEET", "HONEY", "MAPLE", "CREAM", "BERRY", "DOUGH", "SUGAR", "JELLY",
    "ICING", "CRISP",
];

// =============================================================================
// Price Table
// =============================================================================

/// One priced option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceEntry {
    pub name: String,
    pub price: Money,
}

/// An ordered name → price table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceTable(Vec<PriceEntry>);

impl PriceTable {
    /// Builds a table from `(name, cents)` pairs.
    pub fn from_cents(entries: &[(&str, i64)]) -> Self {
        PriceTable(
            entries
                .iter()
                .map(|(name, cents)| PriceEntry {
                    name: (*name).to_string(),
                    price: Money::from_cents(*cents),
                })
                .collect(),
        )
    }

    /// Looks up a price by exact name.
    pub fn get(&self, name: &str) -> Option<Money> {
        self.0.iter().find(|e| e.name == name).map(|e| e.price)
    }

    /// Checks if the table lists `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Option names in menu order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.name.as_str())
    }

    pub fn entries(&self) -> &[PriceEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Combines two tables; entries in `other` win on name clashes.
    ///
    /// A clashing name keeps its original position but takes the later
    /// price, so "Strawberry" stays among the fruits at the ice-cream price.
    pub fn merged(&self, other: &PriceTable) -> PriceTable {
        let mut entries = self.0.clone();
        for entry in &other.0 {
            match entries.iter_mut().find(|e| e.name == entry.name) {
                Some(existing) => existing.price = entry.price,
                None => entries.push(entry.clone()),
            }
        }
        PriceTable(entries)
    }
}

// =============================================================================
// Presets and Components
// =============================================================================

/// A fixed combo meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PresetCombo {
    pub name: String,
    pub items: Vec<String>,
    pub price: Money,
}

impl PresetCombo {
    fn new(name: &str, items: &[&str], cents: i64) -> Self {
        PresetCombo {
            name: name.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
            price: Money::from_cents(cents),
        }
    }

    /// The cart line for one of this combo.
    pub fn line_item(&self) -> CartLineItem {
        CartLineItem::new(self.name.clone(), self.items.join(", "), self.price, 1)
    }
}

/// Build-your-own component prices, grouped as on the menu board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPrices {
    pub batters: PriceTable,
    pub fruits: PriceTable,
    pub syrups: PriceTable,
    pub ice_creams: PriceTable,
}

impl ComponentPrices {
    /// Fruits and ice creams offered together as toppings.
    pub fn toppings(&self) -> PriceTable {
        self.fruits.merged(&self.ice_creams)
    }
}

// =============================================================================
// Price Catalog
// =============================================================================

/// Everything the order screen can sell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceCatalog {
    pub presets: Vec<PresetCombo>,
    pub component_prices: ComponentPrices,
    pub drink_prices: PriceTable,
}

impl PriceCatalog {
    /// The Waffle World menu.
    pub fn standard() -> Self {
        PriceCatalog {
            presets: vec![
                PresetCombo::new("Milo Meal", &["Classic Waffle", "Milo"], 400),
                PresetCombo::new("Chocolate Heaven", &["Chocolate Chip Waffle", "Ice Cream"], 450),
                PresetCombo::new("Berry Blast", &["Strawberry Waffle", "Milo"], 450),
            ],
            component_prices: ComponentPrices {
                batters: PriceTable::from_cents(&[("Classic", 0), ("Pandan", 50), ("Whole Grain", 75)]),
                fruits: PriceTable::from_cents(&[
                    ("Banana", 100),
                    ("Strawberry", 100),
                    ("Blueberry", 100),
                    ("None", 0),
                    ("Cherry", 100),
                ]),
                syrups: PriceTable::from_cents(&[
                    ("Maple", 50),
                    ("Chocolate", 75),
                    ("Honey", 50),
                    ("None", 0),
                ]),
                ice_creams: PriceTable::from_cents(&[
                    ("Vanilla", 150),
                    ("Chocolate", 150),
                    ("Strawberry", 150),
                    ("None", 0),
                    ("Salted Caramel", 200),
                    ("Oreo", 200),
                ]),
            },
            drink_prices: PriceTable::from_cents(&[
                ("None", 0),
                ("Water", 100),
                ("Milo", 200),
                ("Sprite", 150),
                ("Coke", 100),
                ("Coke Zero", 70),
                ("Choc Milkshake", 200),
            ]),
        }
    }

    /// Finds a preset by exact name.
    pub fn preset(&self, name: &str) -> Option<&PresetCombo> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Builds the cart line for a preset.
    pub fn preset_line_item(&self, name: &str) -> CoreResult<CartLineItem> {
        self.preset(name)
            .map(PresetCombo::line_item)
            .ok_or_else(|| CoreError::PresetNotFound(name.to_string()))
    }

    /// Topping table (fruits + ice creams).
    pub fn toppings(&self) -> PriceTable {
        self.component_prices.toppings()
    }
}

impl Default for PriceCatalog {
    fn default() -> Self {
        PriceCatalog::standard()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
