//! # Error Types
//!
//! Domain-specific error types for waffle-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  waffle-core errors (this file)                                        │
//! │  ├── CoreError        - Catalog and cart failures                      │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── GuessRejection   - Word-game guesses that are not evaluated       │
//! │                                                                         │
//! │  Kiosk API errors (in app)                                             │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → UI                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are fatal. Every one maps to a user-facing notice and the
//! session keeps going.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested preset combo is not on the menu.
    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    /// No cart line exists at the given position.
    ///
    /// ## When This Occurs
    /// - The UI removes a line that was already removed
    /// - The cart was cleared by checkout in between
    #[error("Cart item {index} not found (cart has {len} items)")]
    ItemNotFound { index: usize, len: usize },

    /// Checkout was requested with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., student code with letters in it).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// More entries were selected than allowed.
    #[error("You can only select up to {max} {field}")]
    TooMany { field: String, max: usize },
}

// =============================================================================
// Guess Rejection
// =============================================================================

/// Why a word-game guess was not evaluated.
///
/// A rejected guess never changes the round: no attempt is consumed and
/// nothing is appended to the history.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessRejection {
    /// The round is already solved.
    #[error("Already solved this round.")]
    AlreadyWon,

    /// The guess is empty or not the same length as the secret.
    #[error("Enter a {expected}-letter word.")]
    LengthMismatch { expected: usize, actual: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
