//! # Storage Error Types
//!
//! Error types for blob load/save operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the failing path for context          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CommitError (state module) ← Alongside ledger rejections              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller decides: a load failure is fatal, a save failure is reported   │
//! │  but the in-memory commit stands                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Blob storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the blob file failed.
    ///
    /// ## When This Occurs
    /// - Data directory is not writable
    /// - Disk full
    /// - File vanished between existence check and read
    #[error("Blob I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blob exists but is not a valid ledger document.
    ///
    /// ## When This Occurs
    /// - Hand-edited or truncated blob
    /// - A newer schema written by a later version
    ///
    /// Deliberately NOT silently replaced with a default ledger: that
    /// would destroy the user's books on a typo.
    #[error("Blob at {path} is not a valid ledger document: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StoreError::Corrupt {
            path: path.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
