//! # API Error Type
//!
//! Unified error type for kiosk commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Kiosk                              │
//! │                                                                         │
//! │  UI                          Rust Backend                               │
//! │  ──                          ────────────                               │
//! │                                                                         │
//! │  {"command":"add_preset","name":"Pancakes"}                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Core Error? ─── CoreError::PresetNotFound ─────┐               │  │
//! │  │         │                                       │               │  │
//! │  │         ▼                                       ▼               │  │
//! │  │  Guess rejected? ─── GuessRejection ──────── ApiError ─────────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  {"ok":false,"error":{"code":"NOT_FOUND",                               │
//! │                       "message":"Preset not found: Pancakes"}}          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No error ends the session: the loop writes the error line and reads the
//! next command.

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;
use waffle_core::{CoreError, GuessRejection, ValidationError};

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Preset not found: Pancakes"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown preset or other missing resource
    NotFound,

    /// Input validation failed (quantity, empty cart checkout, bad command)
    ValidationError,

    /// Cart operation failed
    CartError,

    /// Word-game guess was not evaluated (informational)
    WordleNotice,

    /// Configuration could not be loaded
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::PresetNotFound(name) => ApiError::not_found("Preset", &name),
            e @ CoreError::ItemNotFound { .. } => ApiError::cart(e.to_string()),
            CoreError::EmptyCart => ApiError::validation("Cart is empty."),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Rejected guesses are notices, not failures.
impl From<GuessRejection> for ApiError {
    fn from(err: GuessRejection) -> Self {
        ApiError::new(ErrorCode::WordleNotice, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        tracing::error!("Config error: {}", err);
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Config Error
// =============================================================================

/// Errors raised while loading [`crate::state::KioskConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for this schema.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parsed but are inconsistent.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Convenience type alias for config loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that stop the kiosk binary.
#[derive(Debug, Error)]
pub enum KioskError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// stdin/stdout failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::PresetNotFound("Pancakes".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Preset not found: Pancakes");

        let err: ApiError = CoreError::ItemNotFound { index: 2, len: 0 }.into();
        assert_eq!(err.code, ErrorCode::CartError);

        let err: ApiError = CoreError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_config_and_validation_mapping() {
        let err: ApiError = ConfigError::Invalid("decay above base".to_string()).into();
        assert_eq!(err.code, ErrorCode::ConfigError);
        assert_eq!(err.message, "Invalid configuration: decay above base");

        let err: ApiError = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_guess_rejection_is_notice() {
        let err: ApiError = GuessRejection::AlreadyWon.into();
        assert_eq!(err.code, ErrorCode::WordleNotice);
        assert_eq!(err.message, "Already solved this round.");
    }

    #[test]
    fn test_error_code_serialization() {
        let err = ApiError::validation("bad");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"VALIDATION_ERROR","message":"bad"}"#);

        let json = serde_json::to_string(&ErrorCode::WordleNotice).unwrap();
        assert_eq!(json, r#""WORDLE_NOTICE""#);
    }
}
