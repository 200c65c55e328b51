//! # State Module
//!
//! Holds the kiosk's state objects.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ SessionState │  │ CatalogState │  │   KioskConfig    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Arc<Mutex<  │  │  presets     │  │  store name      │              │
//! │  │    Session   │  │  components  │  │  tier policy     │              │
//! │  │  >>          │  │  batch price │  │  wordle seed     │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  • SessionState: Protected by Arc<Mutex<T>> for exclusive access       │
//! │  • CatalogState, KioskConfig: Read-only after initialization           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands take only the pieces they need.

mod catalog;
mod config;
mod session;

pub use catalog::CatalogState;
pub use config::{
    DiscountSettings, KioskConfig, PricingSettings, StoreSettings, WordleSettings,
    CONFIG_FILE_NAME,
};
pub use session::{Session, SessionState};

/// All state for one running kiosk.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session: SessionState,
    pub catalog: CatalogState,
    pub config: KioskConfig,
}

impl AppState {
    pub fn new(config: KioskConfig) -> Self {
        AppState {
            session: SessionState::new(Session::from_config(&config)),
            catalog: CatalogState::from_config(&config),
            config,
        }
    }
}
