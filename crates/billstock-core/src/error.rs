//! # Error Types
//!
//! Domain-specific error types for billstock-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  billstock-core errors (this file)                                     │
//! │  ├── LedgerError      - Business rule violations, referential misses  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  billstock-store errors (separate crate)                               │
//! │  └── StoreError       - Blob load/save failures                        │
//! │                                                                         │
//! │  billstock-export errors (separate crate)                              │
//! │  └── ExportError      - Document rendering failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → LedgerError → caller / frontend message       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (names, quantities, ids)
//! 3. Errors are enum variants, never String
//! 4. Referential misses are explicit variants — callers assert on the
//!    result instead of inferring "nothing happened" from unchanged state
//! 5. Rejections are final until inputs change; nothing here is retryable

use thiserror::Error;

// =============================================================================
// Ledger Error
// =============================================================================

/// Errors produced by ledger queries and mutation operations.
///
/// A returned error guarantees the ledger was left byte-identical: every
/// operation validates completely before applying anything.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The referenced product id does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The referenced client id does not exist.
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    /// The referenced transaction id does not exist.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    /// The warehouse does not hold enough stock for the operation.
    ///
    /// ## When This Occurs
    /// - Dispatching more than `current_stock`
    /// - A manual adjustment or transaction edit that would drive
    ///   `current_stock` below zero
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: f64,
        requested: f64,
    },

    /// The client does not hold enough dispatched stock to report the sale.
    ///
    /// ## When This Occurs
    /// - `client_stock_balance(client, product) < quantity` — the client
    ///   would be selling stock they were never given
    #[error("{client} holds {available} of {product}, cannot report a sale of {requested}")]
    InsufficientClientStock {
        client: String,
        product: String,
        available: f64,
        requested: f64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements, before any
/// business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LedgerError::InsufficientStock {
            name: "Basmati Rice".to_string(),
            available: 3.0,
            requested: 5.0,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Basmati Rice: available 3, requested 5"
        );

        let err = LedgerError::ProductNotFound("p-123".to_string());
        assert_eq!(err.to_string(), "Product not found: p-123");
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
    fn test_validation_converts_to_ledger_error() {
        let validation_err = ValidationError::Required {
            field: "reason".to_string(),
        };
        let ledger_err: LedgerError = validation_err.into();
        assert!(matches!(ledger_err, LedgerError::Validation(_)));
    }
}
