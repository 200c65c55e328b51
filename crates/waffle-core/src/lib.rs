//! # waffle-core: Pure Ordering Logic for the Waffle World Kiosk
//!
//! This crate is the **heart** of the kiosk. It contains the pricing,
//! discount and word-game rules as pure functions over plain data.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Waffle World Kiosk                                 │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI layer (out of tree)                       │   │
//! │  │    Home ──► Order ──► Wordle ──► Checkout                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON commands                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/kiosk (commands + session)              │   │
//! │  │    add_preset, add_custom_waffle, submit_wordle_guess, ...      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ waffle-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐ ┌──────────┐  │   │
//! │  │  │ catalog │ │ pricing │ │ discount │ │ wordle │ │   cart   │  │   │
//! │  │  │ presets │ │ batches │ │  tiers   │ │ rounds │ │ CartStore│  │   │
//! │  │  │ prices  │ │subtotal │ │ student  │ │feedback│ │          │  │   │
//! │  │  └─────────┘ └─────────┘ └──────────┘ └────────┘ └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • DETERMINISTIC GIVEN AN RNG         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer cent arithmetic
//! - [`types`] - Line items, discount kinds and rates, pages
//! - [`catalog`] - Static menu data
//! - [`pricing`] - Selection, batch and subtotal math
//! - [`discount`] - Discount set and rules
//! - [`wordle`] - The waffle word-guessing game
//! - [`cart`] - The cart store
//! - [`validation`] - Input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use waffle_core::{cart::CartStore, catalog::PriceCatalog, discount::TierPolicy};
//!
//! let catalog = PriceCatalog::standard();
//! let mut cart = CartStore::new(TierPolicy::Recompute);
//!
//! let item = catalog.preset_line_item("Milo Meal").unwrap();
//! cart.add_item(item);
//!
//! assert_eq!(cart.subtotal().cents(), 400);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod discount;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;
pub mod wordle;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, GuessRejection, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum toppings on one custom waffle order.
pub const MAX_TOPPINGS: usize = 3;

/// Maximum syrups on one custom waffle order.
pub const MAX_SYRUPS: usize = 2;

/// Largest batch a single custom order may contain.
///
/// ## Business Reason
/// The order screen offers 1 to 4 waffles per custom build.
pub const MAX_CUSTOM_QUANTITY: i64 = 4;

/// Guesses allowed per word-game round.
pub const MAX_WORDLE_ATTEMPTS: u32 = 5;

/// Price of the first waffle in a custom batch ($2.00).
pub const WAFFLE_BASE_PRICE: Money = Money::from_cents(200);

/// Price reduction for each additional waffle in the same batch ($0.20).
pub const WAFFLE_DECAY_PER_UNIT: Money = Money::from_cents(20);
