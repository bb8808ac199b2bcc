//! # Validation Module
//!
//! Field-level validation for mutation inputs.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (external)                                          │
//! │  ├── Required form fields, basic format checks                         │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Field rules (empty, length, sign, finiteness)                     │
//! │  └── Runs before any state is read or touched                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Operation preconditions (ops module)                         │
//! │  ├── Referential checks (product/client/transaction exist)             │
//! │  └── Stock and client-balance sufficiency                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::MAX_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (product, client, or company).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_NAME_LEN`] characters
///
/// ## Returns
/// The trimmed name.
///
/// ## Example
/// ```rust
/// use billstock_core::validation::validate_name;
///
/// assert_eq!(validate_name("  Basmati Rice ", "name").unwrap(), "Basmati Rice");
/// assert!(validate_name("", "name").is_err());
/// ```
pub fn validate_name(name: &str, field: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates an audit reason for a manual stock adjustment.
///
/// ## Rules
/// - Must not be empty after trimming — every manual change must say why
pub fn validate_reason(reason: &str) -> ValidationResult<String> {
    let reason = reason.trim();

    if reason.is_empty() {
        return Err(ValidationError::Required {
            field: "reason".to_string(),
        });
    }

    Ok(reason.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a transaction quantity.
///
/// ## Rules
/// - Must be finite (rejects NaN and infinities)
/// - Must be strictly positive
pub fn validate_quantity(qty: f64) -> ValidationResult<()> {
    if !qty.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "quantity".to_string(),
        });
    }

    if qty <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit rate (purchase or sale).
///
/// ## Rules
/// - Must be finite
/// - Zero is allowed (free or promotional stock), negative is not
pub fn validate_rate(rate: f64, field: &str) -> ValidationResult<()> {
    if !rate.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if rate < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates an absolute stock level (registration or product edit).
///
/// ## Rules
/// - Must be finite
/// - Must be zero or greater — `current_stock` is never negative
pub fn validate_stock_level(stock: f64) -> ValidationResult<()> {
    if !stock.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "stock".to_string(),
        });
    }

    if stock < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

/// Validates a signed manual-adjustment delta.
///
/// Sign is free (restock or write-off); only NaN/infinite deltas are
/// rejected here. Whether the resulting level stays non-negative is an
/// operation precondition, not a field rule.
pub fn validate_stock_delta(change: f64) -> ValidationResult<()> {
    if !change.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "change".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
