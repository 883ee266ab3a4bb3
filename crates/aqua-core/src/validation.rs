//! # Validation Module
//!
//! Caller-side input validation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend                                                     │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE, run by the app layer before any engine call     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: The engine itself                                            │
//! │  └── ONLY referential checks. It computes with whatever numbers it     │
//! │      receives - by contract, not by accident.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Negative stock and negative balances are deliberately NOT validated
//! anywhere: they are observable business states, not input errors.

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_DELIVERY_FREQUENCY_DAYS, MAX_SALE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer, salesman or item display name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates an expense category name. Free-form, but required.
pub fn validate_expense_category(category: &str) -> ValidationResult<()> {
    if category.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_SALE_QUANTITY
///
/// Payment-only and empties-collection entries legitimately carry zero
/// quantity; the form layer only runs this validator on delivery and
/// counter sales where a quantity was asked for.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_SALE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_SALE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates an empties-collected count. Zero is the common case.
pub fn validate_empties_collected(count: i64) -> ValidationResult<()> {
    if count < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "empties collected".to_string(),
        });
    }

    Ok(())
}

/// Validates a billed or received amount on a sale form.
///
/// Amounts are non-negative at the input boundary; signed balances arise
/// from ledger arithmetic, never from direct entry.
pub fn validate_amount(amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a payment amount. Paying zero is a no-op the form rejects.
pub fn validate_payment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a delivery frequency in days.
///
/// ## Rules
/// - 0 is valid and means on-demand (never auto-scheduled)
/// - Must not be negative or beyond MAX_DELIVERY_FREQUENCY_DAYS
pub fn validate_delivery_frequency(days: i64) -> ValidationResult<()> {
    if !(0..=MAX_DELIVERY_FREQUENCY_DAYS).contains(&days) {
        return Err(ValidationError::OutOfRange {
            field: "delivery frequency".to_string(),
            min: 0,
            max: MAX_DELIVERY_FREQUENCY_DAYS,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format (customer/item/salesman references
/// arriving from the UI).
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
