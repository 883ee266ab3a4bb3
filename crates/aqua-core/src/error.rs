//! # Error Types
//!
//! Domain-specific error types for aqua-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  aqua-core errors (this file)                                          │
//! │  ├── CoreError        - Referential failures in ledger operations      │
//! │  └── ValidationError  - Caller-side input validation failures          │
//! │                                                                         │
//! │  Storage / app layers (outside this repo) wrap CoreError into their    │
//! │  own error types before it reaches the UI.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (the id that failed to resolve)
//! 3. Errors are enum variants, never String
//! 4. The ledger engine raises exactly one failure class: a referenced
//!    entity was not found. Data-quality states (negative stock, negative
//!    balance) are valid snapshots, not errors.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// An `Err` from any engine operation means the operation did not happen:
/// the caller still holds the unmodified input snapshot.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A sale referenced a customer id that is not in the snapshot.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// A sale referenced an inventory item id that is not in the snapshot.
    #[error("Inventory item not found: {0}")]
    ItemNotFound(String),

    /// Update or delete targeted a sale id that is not in the snapshot.
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The engine itself never re-validates input (that is the caller's job);
/// these are raised by the `validation` module helpers the UI layer runs
/// before invoking an operation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::CustomerNotFound("c-42".to_string());
        assert_eq!(err.to_string(), "Customer not found: c-42");

        let err = CoreError::SaleNotFound("s-7".to_string());
        assert_eq!(err.to_string(), "Sale not found: s-7");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
