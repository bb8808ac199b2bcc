//! # Blob Store
//!
//! The single-document JSON store.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Blob Lifecycle                                    │
//! │                                                                         │
//! │  Startup                                                                │
//! │  ───────                                                                │
//! │  load() ──► file present? ──► parse whole Ledger                       │
//! │                 │                                                       │
//! │                 └── absent ──► default Ledger (empty collections,      │
//! │                                next bill number 1001)                  │
//! │                                                                         │
//! │  After every committed mutation                                         │
//! │  ──────────────────────────────                                        │
//! │  save() ──► serialize whole Ledger ──► write billstock_data.json.tmp  │
//! │                                          │                              │
//! │                                          └──► rename over the blob     │
//! │                                                                         │
//! │  The rename keeps a torn write from ever replacing a good blob.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use billstock_core::Ledger;

use crate::error::{StoreError, StoreResult};

/// Fixed blob name — the store's single storage key.
pub const BLOB_FILE_NAME: &str = "billstock_data.json";

/// Loads and saves the entire ledger as one JSON document.
#[derive(Debug, Clone)]
pub struct BlobStore {
    path: PathBuf,
}

impl BlobStore {
    /// Creates a store keeping its blob at `<dir>/billstock_data.json`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        BlobStore {
            path: dir.into().join(BLOB_FILE_NAME),
        }
    }

    /// Creates a store over an explicit blob path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        BlobStore { path: path.into() }
    }

    /// The blob's location on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the whole ledger.
    ///
    /// An absent blob is a normal first run and yields the default
    /// ledger. A present-but-unparsable blob is an error — see
    /// [`StoreError::Corrupt`].
    pub fn load(&self) -> StoreResult<Ledger> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No blob yet, starting with a fresh ledger");
                return Ok(Ledger::default());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let ledger: Ledger =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::corrupt(&self.path, e))?;

        debug!(
            path = %self.path.display(),
            products = ledger.inventory.len(),
            clients = ledger.clients.len(),
            transactions = ledger.transactions.len(),
            "Ledger loaded"
        );
        Ok(ledger)
    }

    /// Rewrites the whole blob.
    ///
    /// Serializes to a sibling temp file first and renames it into
    /// place, so a crash mid-write leaves the previous blob intact.
    pub fn save(&self, ledger: &Ledger) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }

        let bytes = serde_json::to_vec(ledger)
            .map_err(|e| StoreError::corrupt(&self.path, e))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &bytes).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "Ledger saved");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use billstock_core::Unit;

    #[test]
    fn test_load_absent_blob_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobStore::new(dir.path());

        let ledger = store.load().unwrap();
        assert!(ledger.inventory.is_empty());
        assert!(ledger.transactions.is_empty());
        assert_eq!(ledger.settings.next_bill_no, 1001);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobStore::new(dir.path());

        let mut ledger = Ledger::default();
        let product = ledger
            .register_product("Basmati Rice", Unit::Kg, 20.0, 10.0, 15.0)
            .unwrap();
        let client = ledger
            .register_client("Sharma Traders", "98765", "Pune")
            .unwrap();
        ledger.dispatch(&client, &product, 5.0, 15.0, 42).unwrap();
        store.save(&ledger).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.inventory.len(), 1);
        assert_eq!(reloaded.clients.len(), 1);
        assert_eq!(reloaded.transactions.len(), 2); // opening purchase + dispatch
        assert_eq!(reloaded.settings.next_bill_no, 1002);
        assert_eq!(reloaded.product(&product).unwrap().current_stock, 15.0);
    }

    #[test]
    fn test_blob_keeps_historical_camel_case_shape() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobStore::new(dir.path());
        store.save(&Ledger::default()).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"inventoryLogs\""));
        assert!(raw.contains("\"nextBillNo\":1001"));
    }

    #[test]
    fn test_corrupt_blob_is_an_error_not_a_reset() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobStore::new(dir.path());
        std::fs::write(store.path(), b"{not json").unwrap();

        assert!(matches!(store.load(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_save_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobStore::new(dir.path().join("nested").join("deeper"));

        store.save(&Ledger::default()).unwrap();
        assert!(store.path().exists());
    }
}
