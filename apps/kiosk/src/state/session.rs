//! # Session State
//!
//! Everything one customer builds up while using the kiosk.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifecycle                                    │
//! │                                                                         │
//! │  Command                  Session Change                                │
//! │  ───────                  ──────────────                                │
//! │                                                                         │
//! │  add_preset ────────────► cart.add_item (tier re-evaluated)             │
//! │  remove_cart_item ──────► cart.remove_item                              │
//! │  apply_student_code ────► discounts[student] = 5%                       │
//! │  submit_wordle_guess ───► wordle round; on win discounts[wordle] = 10%  │
//! │  navigate ──────────────► page                                          │
//! │                                                                         │
//! │  complete_checkout ─────► clear_order(): cart, discounts, wordle        │
//! │  reset_all ─────────────► reset(): clear_order() + page = Home          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>`; every command takes the lock
//! for its whole duration, so commands never interleave.

use std::sync::{Arc, Mutex, PoisonError};

use waffle_core::cart::CartStore;
use waffle_core::discount::{DiscountSet, TierPolicy};
use waffle_core::wordle::WordleGame;
use waffle_core::Page;

use super::config::KioskConfig;

/// One customer's session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Cart lines plus the discounts attached to them.
    pub cart: CartStore,

    /// The live word-game round and its RNG.
    pub wordle: WordleGame,

    /// Page the UI should show.
    pub page: Page,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(TierPolicy::default(), WordleGame::new())
    }
}

impl Session {
    pub fn new(policy: TierPolicy, wordle: WordleGame) -> Self {
        Session {
            cart: CartStore::new(policy),
            wordle,
            page: Page::Home,
        }
    }

    /// Builds a session from the tier policy and word-game settings.
    pub fn from_config(config: &KioskConfig) -> Self {
        let mut wordle = match config.wordle.seed {
            Some(seed) => WordleGame::new_with_seed(seed),
            None => WordleGame::new(),
        };
        if let Some(words) = &config.wordle.words {
            wordle = wordle.with_words(words);
        }

        Self::new(config.discounts.tier_policy, wordle)
    }

    pub fn discounts(&self) -> &DiscountSet {
        self.cart.discounts()
    }

    pub fn discounts_mut(&mut self) -> &mut DiscountSet {
        self.cart.discounts_mut()
    }

    /// Clears the cart, every discount and the word-game round.
    ///
    /// The page is left where it is.
    pub fn clear_order(&mut self) {
        self.cart.clear();
        self.wordle.reset();
    }

    /// Starts over: [`Session::clear_order`] plus a return to Home.
    pub fn reset(&mut self) {
        self.clear_order();
        self.page = Page::Home;
    }
}

/// Shared handle to the session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Arc<Mutex<Session>>,
}

impl SessionState {
    pub fn new(session: Session) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let page = session_state.with_session(|s| s.page);
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    /// Executes a function with write access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }
}
