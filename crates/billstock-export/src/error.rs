//! # Export Error Types
//!
//! Failures while turning ledger snapshots into documents. None of
//! these can affect committed ledger state — generation happens
//! strictly after the commit.

use std::path::PathBuf;
use thiserror::Error;

/// Document generation errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to export — no dispatch invoices exist yet.
    #[error("No invoice data available to export")]
    NoData,

    /// The invoice font family could not be loaded.
    ///
    /// ## When This Occurs
    /// - The fonts directory is missing or lacks the Roboto files
    #[error("Invoice fonts not found: {0}")]
    FontNotFound(String),

    /// PDF layout or rendering failed.
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    /// CSV serialization failed.
    #[error("CSV writing failed: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the output file failed.
    #[error("Export I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
