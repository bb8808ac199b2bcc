//! # billstock-core: Pure Business Logic for BillStock
//!
//! This crate is the **heart** of BillStock, a small-business inventory and
//! billing tracker. It contains the entire bookkeeping model as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       BillStock Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Frontend (external, TypeScript)                 │   │
//! │  │    Dashboard ──► Inventory ──► Clients ──► Billing ──► Logs    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ billstock-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  ledger   │  │    ops    │  │ validation│  │   │
//! │  │   │  Product  │  │  balances │  │  dispatch │  │   rules   │  │   │
//! │  │   │  Ledger   │  │  totals   │  │  purchase │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILE SYSTEM • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               billstock-store (Persistence Layer)               │   │
//! │  │          Single JSON blob, rewritten after every commit         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Client, Transaction, Ledger, etc.)
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level validation rules
//! - [`ledger`] - Derived queries (stock balances, performance, totals)
//! - [`ops`] - Mutation operations (the only way the ledger changes)
//! - [`invoice`] - Invoice snapshots handed to the export collaborators
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every query is deterministic over a ledger snapshot
//! 2. **Validate Then Apply**: a rejected operation leaves the ledger
//!    byte-identical; there is no partial-application failure mode
//! 3. **Explicit Errors**: referential misses are typed errors, never
//!    silent no-ops and never panics
//! 4. **Snapshot Fields**: denormalized copies (product names on
//!    transactions, profit at dispatch time) are intentionally frozen
//!
//! ## Example Usage
//!
//! ```rust
//! use billstock_core::{Ledger, Unit};
//!
//! let mut ledger = Ledger::default();
//! let product = ledger.register_product("Basmati Rice", Unit::Kg, 0.0, 10.0, 15.0)?;
//! let client = ledger.register_client("Sharma Traders", "98765", "Pune")?;
//!
//! ledger.record_purchase(&product, 20.0, 10.0)?;
//! let invoice = ledger.dispatch(&client, &product, 5.0, 15.0, 1_700_000_000_000)?;
//!
//! assert_eq!(invoice.bill_number, "INV-1001");
//! # Ok::<(), billstock_core::LedgerError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod invoice;
pub mod ledger;
pub mod ops;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use billstock_core::Ledger` instead of
// `use billstock_core::types::Ledger`

pub use error::{LedgerError, LedgerResult, ValidationError};
pub use invoice::{DispatchListener, InvoiceClient, InvoiceData, InvoiceLine};
pub use ledger::{weighted_average_cost, ClientPerformance, DashboardTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// First bill number allocated by a fresh ledger.
///
/// Bill numbers are rendered as `INV-{n}` and advance exactly once per
/// successful dispatch. They are never reused, even when a dispatch is
/// later edited.
pub const STARTING_BILL_NO: u64 = 1001;

/// Default sale-rate markup applied when a purchase creates a brand-new
/// product: `sale_rate = purchase_rate × 1.2`.
///
/// The owner can overwrite the sale rate at any time; every transaction
/// records its own rate, so this is only a starting suggestion.
pub const NEW_PRODUCT_MARKUP: f64 = 1.2;

/// Maximum length accepted for names (products, clients, company).
pub const MAX_NAME_LEN: usize = 200;
