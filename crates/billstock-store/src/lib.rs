//! # billstock-store: Persistence Layer for BillStock
//!
//! Durable storage and the single-writer state handle for the ledger.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       BillStock Data Flow                               │
//! │                                                                         │
//! │  Caller (frontend command / seed binary / tests)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  billstock-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐              ┌───────────────────────────┐ │   │
//! │  │   │  LedgerState  │              │         BlobStore         │ │   │
//! │  │   │  (state.rs)   │─── save ────►│         (blob.rs)         │ │   │
//! │  │   │               │              │                           │ │   │
//! │  │   │ Arc<Mutex<…>> │◄── load ─────│  billstock_data.json      │ │   │
//! │  │   │ commit(op)    │              │  write temp → rename      │ │   │
//! │  │   └───────────────┘              └───────────────────────────┘ │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  billstock-core: Ledger + mutation operations (pure)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`blob`] - The single-document JSON store
//! - [`state`] - The shared state handle (commit, persist, notify)
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use billstock_store::{BlobStore, LedgerState};
//!
//! let state = LedgerState::open(BlobStore::new("./data"))?;
//!
//! let client = state.commit(|l| l.register_client("Sharma Traders", "98765", "Pune"))?;
//! let totals = state.with_ledger(|l| l.dashboard_totals());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod blob;
pub mod error;
pub mod state;

// =============================================================================
// Re-exports
// =============================================================================

pub use blob::{BlobStore, BLOB_FILE_NAME};
pub use error::{StoreError, StoreResult};
pub use state::{CommitError, LedgerState};
