//! # Ledger State
//!
//! The shared, single-writer handle around the in-memory ledger.
//!
//! ## Commit Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     LedgerState::commit(op)                             │
//! │                                                                         │
//! │  lock ──► run ONE mutation to completion ──► rejected? ──► unlock,     │
//! │                 │                              typed error, blob        │
//! │                 │                              untouched                │
//! │                 ▼                                                       │
//! │            save whole blob ──► failed? ──► commit STANDS in memory,    │
//! │                 │                           CommitError::Store out     │
//! │                 ▼                                                       │
//! │            unlock, return the operation's value                        │
//! │                                                                         │
//! │  dispatch() additionally hands the invoice snapshot to the             │
//! │  registered listener — strictly after the commit, fire-and-forget.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The ledger is wrapped in `Arc<Mutex<T>>`: callers may share the
//! handle, but the lock serializes mutations so there is exactly one
//! logical writer at a time — the model the whole bookkeeping core
//! assumes. Operations are quick in-memory scans; a plain Mutex is
//! enough.

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, info, warn};

use billstock_core::{DispatchListener, InvoiceData, Ledger, LedgerError, LedgerResult};

use crate::blob::BlobStore;
use crate::error::StoreError;

/// Errors surfaced by a [`LedgerState`] commit.
#[derive(Debug, Error)]
pub enum CommitError {
    /// The operation itself was rejected; nothing changed anywhere.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The operation committed in memory but the blob write failed.
    /// The in-memory state stands; persistence is a post-commit side
    /// effect, not part of the operation's atomicity.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Shared ledger handle: one in-memory ledger, one blob, one writer at
/// a time.
pub struct LedgerState {
    ledger: Arc<Mutex<Ledger>>,
    store: BlobStore,
    listener: Option<Box<dyn DispatchListener + Send + Sync>>,
}

impl LedgerState {
    /// Loads the blob (or the first-run default) and wraps it.
    pub fn open(store: BlobStore) -> Result<Self, StoreError> {
        let ledger = store.load()?;
        info!(
            path = %store.path().display(),
            next_bill_no = ledger.settings.next_bill_no,
            "Ledger state opened"
        );
        Ok(LedgerState {
            ledger: Arc::new(Mutex::new(ledger)),
            store,
            listener: None,
        })
    }

    /// Registers the post-commit dispatch listener (the invoice
    /// document collaborator). At most one; later calls replace it.
    pub fn with_listener(mut self, listener: Box<dyn DispatchListener + Send + Sync>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Executes a function with read access to the ledger.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = state.with_ledger(|l| l.dashboard_totals());
    /// ```
    pub fn with_ledger<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Ledger) -> R,
    {
        let ledger = self.ledger.lock().expect("Ledger mutex poisoned");
        f(&ledger)
    }

    /// Runs one mutation operation to completion and persists the blob.
    ///
    /// A rejected operation propagates its typed error and the blob is
    /// not rewritten. A blob-write failure after a successful mutation
    /// keeps the in-memory commit and surfaces
    /// [`CommitError::Store`] — at worst a crash before the next
    /// successful save loses this one mutation.
    pub fn commit<F, T>(&self, f: F) -> Result<T, CommitError>
    where
        F: FnOnce(&mut Ledger) -> LedgerResult<T>,
    {
        let mut ledger = self.ledger.lock().expect("Ledger mutex poisoned");
        let value = f(&mut ledger)?;

        if let Err(e) = self.store.save(&ledger) {
            warn!(error = %e, "Mutation committed in memory but blob write failed");
            return Err(CommitError::Store(e));
        }

        Ok(value)
    }

    /// Commits a dispatch, then hands the invoice snapshot to the
    /// registered listener.
    ///
    /// The listener runs strictly after commit + save; whatever it does
    /// (or fails to do) cannot affect the ledger.
    pub fn dispatch(
        &self,
        client_id: &str,
        product_id: &str,
        quantity: f64,
        rate: f64,
        timestamp: i64,
    ) -> Result<InvoiceData, CommitError> {
        let invoice =
            self.commit(|l| l.dispatch(client_id, product_id, quantity, rate, timestamp))?;

        debug!(bill = %invoice.bill_number, client = %invoice.client.name, "Dispatch committed");
        if let Some(listener) = &self.listener {
            listener.on_dispatch(&invoice);
        }

        Ok(invoice)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use billstock_core::Unit;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn open_state(dir: &std::path::Path) -> LedgerState {
        LedgerState::open(BlobStore::new(dir)).unwrap()
    }

    #[test]
    fn test_commit_persists_blob() {
        let dir = tempfile::tempdir().unwrap();
        let state = open_state(dir.path());

        state
            .commit(|l| l.register_product("Rice", Unit::Kg, 10.0, 5.0, 9.0))
            .unwrap();

        // A fresh handle over the same directory sees the commit.
        let reopened = open_state(dir.path());
        assert_eq!(reopened.with_ledger(|l| l.inventory.len()), 1);
    }

    #[test]
    fn test_rejected_commit_leaves_blob_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let state = open_state(dir.path());
        let store = BlobStore::new(dir.path());

        let result = state.commit(|l| l.record_purchase("ghost", 5.0, 1.0));
        assert!(matches!(
            result,
            Err(CommitError::Ledger(LedgerError::ProductNotFound(_)))
        ));

        // Nothing was ever written.
        assert!(!store.path().exists());
    }

    struct CountingListener(Arc<AtomicUsize>);

    impl DispatchListener for CountingListener {
        fn on_dispatch(&self, invoice: &InvoiceData) {
            assert!(invoice.bill_number.starts_with("INV-"));
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_listener_notified_after_committed_dispatch_only() {
        let dir = tempfile::tempdir().unwrap();
        let notified = Arc::new(AtomicUsize::new(0));
        let state =
            open_state(dir.path()).with_listener(Box::new(CountingListener(notified.clone())));

        let (product, client) = state
            .commit(|l| {
                let product = l.register_product("Rice", Unit::Kg, 10.0, 5.0, 9.0)?;
                let client = l.register_client("Sharma Traders", "98765", "Pune")?;
                Ok((product, client))
            })
            .unwrap();

        // A rejected dispatch must not reach the listener.
        assert!(state.dispatch(&client, &product, 99.0, 9.0, 1).is_err());
        assert_eq!(notified.load(Ordering::SeqCst), 0);

        state.dispatch(&client, &product, 4.0, 9.0, 1).unwrap();
        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }
}
