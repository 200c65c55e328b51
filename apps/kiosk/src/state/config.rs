//! # Kiosk Configuration
//!
//! Configuration loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     WAFFLE_STORE_NAME="Waffle World Downtown"                          │
//! │     WAFFLE_TIER_POLICY=sticky                                          │
//! │     WAFFLE_WORDLE_SEED=42                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     path given on the command line, else                               │
//! │     ~/.config/waffle-kiosk/waffle-kiosk.toml (Linux)                   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Waffle World"
//! currency_symbol = "$"
//!
//! [pricing]
//! waffle_base_cents = 200
//! waffle_decay_cents = 20
//!
//! [discounts]
//! tier_policy = "recompute"  # recompute | sticky
//!
//! [wordle]
//! seed = 42                  # optional
//! ```
//!
//! Read-only after initialization, so no mutex.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use waffle_core::discount::TierPolicy;
use waffle_core::pricing::WafflePricing;
use waffle_core::wordle::{is_playable_word, WORD_LENGTH};
use waffle_core::{Money, WAFFLE_BASE_PRICE, WAFFLE_DECAY_PER_UNIT};

use crate::error::{ConfigError, ConfigResult};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "waffle-kiosk.toml";

// =============================================================================
// Sections
// =============================================================================

/// Store identity shown on receipts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_store_name() -> String {
    "Waffle World".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Custom waffle batch pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Price of the first waffle, in cents.
    #[serde(default = "default_base_cents")]
    pub waffle_base_cents: i64,

    /// Reduction for each further waffle in a batch, in cents.
    #[serde(default = "default_decay_cents")]
    pub waffle_decay_cents: i64,
}

fn default_base_cents() -> i64 {
    WAFFLE_BASE_PRICE.cents()
}

fn default_decay_cents() -> i64 {
    WAFFLE_DECAY_PER_UNIT.cents()
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            waffle_base_cents: default_base_cents(),
            waffle_decay_cents: default_decay_cents(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSettings {
    #[serde(default)]
    pub tier_policy: TierPolicy,
}

/// Word game settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordleSettings {
    /// Seed for reproducible secret draws. Unset means the thread RNG.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Replacement word list. Unset means the built-in waffle words.
    #[serde(default)]
    pub words: Option<Vec<String>>,
}

// =============================================================================
// Kiosk Config
// =============================================================================

/// Complete kiosk configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KioskConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub discounts: DiscountSettings,

    #[serde(default)]
    pub wordle: WordleSettings,
}

impl KioskConfig {
    /// Loads configuration from file and environment.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading kiosk config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load kiosk config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML file without env overrides or validation.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let p = &self.pricing;

        if p.waffle_base_cents < 0 || p.waffle_decay_cents < 0 {
            return Err(ConfigError::Invalid(
                "waffle prices must not be negative".into(),
            ));
        }

        if p.waffle_decay_cents > p.waffle_base_cents {
            return Err(ConfigError::Invalid(format!(
                "waffle_decay_cents ({}) must not exceed waffle_base_cents ({})",
                p.waffle_decay_cents, p.waffle_base_cents
            )));
        }

        if let Some(words) = &self.wordle.words {
            if words.iter().all(|w| w.trim().is_empty()) {
                return Err(ConfigError::Invalid("wordle.words must not be empty".into()));
            }
            if let Some(bad) = words.iter().find(|w| !is_playable_word(w)) {
                return Err(ConfigError::Invalid(format!(
                    "wordle.words entry {:?} is not a {}-letter word",
                    bad, WORD_LENGTH
                )));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("WAFFLE_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Ok(policy) = std::env::var("WAFFLE_TIER_POLICY") {
            match policy.parse() {
                Ok(parsed) => {
                    debug!(policy = %policy, "Overriding tier policy from environment");
                    self.discounts.tier_policy = parsed;
                }
                Err(e) => warn!("Ignoring WAFFLE_TIER_POLICY: {}", e),
            }
        }

        if let Ok(seed) = std::env::var("WAFFLE_WORDLE_SEED") {
            match seed.parse::<u64>() {
                Ok(s) => self.wordle.seed = Some(s),
                Err(_) => warn!(seed = %seed, "Ignoring non-numeric WAFFLE_WORDLE_SEED"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "waffleworld", "waffle-kiosk")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Batch pricing for custom waffles.
    pub fn waffle_pricing(&self) -> WafflePricing {
        WafflePricing {
            base: Money::from_cents(self.pricing.waffle_base_cents),
            decay: Money::from_cents(self.pricing.waffle_decay_cents),
        }
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use waffle_kiosk::state::KioskConfig;
    ///
    /// let config = KioskConfig::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.store.currency_symbol,
            (cents / 100).abs(),
            (cents % 100).abs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_currency() {
        let config = KioskConfig::default();
        assert_eq!(config.format_currency(400), "$4.00");
        assert_eq!(config.format_currency(1), "$0.01");
        assert_eq!(config.format_currency(0), "$0.00");
        assert_eq!(config.format_currency(-1234), "-$12.34");
    }

    #[test]
    fn test_defaults() {
        let config = KioskConfig::default();
        assert_eq!(config.store.name, "Waffle World");
        assert_eq!(config.discounts.tier_policy, TierPolicy::Recompute);
        assert_eq!(config.waffle_pricing(), WafflePricing::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[discounts]
tier_policy = "sticky"

[wordle]
seed = 7
"#
        )
        .unwrap();

        let config = KioskConfig::from_file(file.path()).unwrap();
        assert_eq!(config.discounts.tier_policy, TierPolicy::Sticky);
        assert_eq!(config.wordle.seed, Some(7));
        assert_eq!(config.pricing, PricingSettings::default());
        assert_eq!(config.store.currency_symbol, "$");
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pricing]\nwaffle_base_cents = \"two dollars\"").unwrap();

        let err = KioskConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate_rejects_decay_above_base() {
        let mut config = KioskConfig::default();
        config.pricing.waffle_decay_cents = 250;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_blank_word_list() {
        let mut config = KioskConfig::default();
        config.wordle.words = Some(vec!["  ".to_string()]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_short_word() {
        let mut config = KioskConfig::default();
        config.wordle.words = Some(vec!["MAPLE".to_string(), "PIE".to_string()]);

        match config.validate() {
            Err(ConfigError::Invalid(msg)) => {
                assert!(msg.contains("\"PIE\""), "message: {}", msg);
                assert!(msg.contains("5-letter"));
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_non_letters() {
        let mut config = KioskConfig::default();
        config.wordle.words = Some(vec!["CR3AM".to_string()]);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.wordle.words = Some(vec![" honey ".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let config = KioskConfig::load_or_default(Some(path));
        assert_eq!(config.pricing, PricingSettings::default());
    }
}
