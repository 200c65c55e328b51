//! # Validation Module
//!
//! Input checks for the kiosk.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI                                                           │
//! │  ├── Number inputs bounded to 1..=4                                    │
//! │  └── Multiselects with menu options only                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Kiosk command (Rust)                                         │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │                                                                         │
//! │  Nothing here is fatal: a failed check becomes a notice to the user.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::MAX_CUSTOM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Length of a student code.
pub const STUDENT_CODE_LEN: usize = 7;

/// Every student code starts with this.
pub const STUDENT_CODE_PREFIX: &str = "10";

// =============================================================================
// Student Codes
// =============================================================================

/// Checks a student code and explains what is wrong with it.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Exactly 7 characters, all ASCII digits
/// - Starts with "10"
///
/// ## Returns
/// The trimmed code.
pub fn check_student_code(code: &str) -> ValidationResult<&str> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "student code".to_string(),
        });
    }

    if code.chars().count() != STUDENT_CODE_LEN || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "student code".to_string(),
            reason: format!("must be {} digits", STUDENT_CODE_LEN),
        });
    }

    if !code.starts_with(STUDENT_CODE_PREFIX) {
        return Err(ValidationError::InvalidFormat {
            field: "student code".to_string(),
            reason: format!("must start with {}", STUDENT_CODE_PREFIX),
        });
    }

    Ok(code)
}

/// Returns whether a student code is valid.
///
/// ## Example
/// ```rust
/// use waffle_core::validation::validate_student_code;
///
/// assert!(validate_student_code("1012345"));
/// assert!(validate_student_code("  1012345 "));
/// assert!(!validate_student_code("2012345"));
/// assert!(!validate_student_code("101234"));
/// assert!(!validate_student_code("10a2345"));
/// ```
pub fn validate_student_code(code: &str) -> bool {
    check_student_code(code).is_ok()
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the size of a custom waffle batch.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_CUSTOM_QUANTITY (4)
pub fn validate_custom_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_CUSTOM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_CUSTOM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
