//! # billstock-export: Document Generation for BillStock
//!
//! The export collaborators: everything that turns committed ledger
//! data into files a human hands to someone else.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Export Data Flow                                  │
//! │                                                                         │
//! │  billstock-store                                                        │
//! │  ───────────────                                                        │
//! │  dispatch committed ──► InvoiceData snapshot                           │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                billstock-export (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────────┐        ┌──────────────────────────┐   │   │
//! │  │   │   invoice_pdf      │        │       spreadsheet        │   │   │
//! │  │   │  PdfInvoiceWriter  │        │  one CSV row per billed  │   │   │
//! │  │   │  INV-1001_….pdf    │        │  dispatch invoice        │   │   │
//! │  │   └────────────────────┘        └──────────────────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   STRICTLY POST-COMMIT • FROZEN SNAPSHOTS • NO LEDGER WRITES   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`invoice_pdf`] - PDF invoice rendering and the dispatch listener
//! - [`spreadsheet`] - CSV export of all dispatch invoices
//! - [`error`] - Export error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod invoice_pdf;
pub mod spreadsheet;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ExportError, ExportResult};
pub use invoice_pdf::{invoice_file_name, render_invoice, PdfInvoiceWriter};
pub use spreadsheet::{export_file_name, export_invoices_csv, invoice_rows, InvoiceRow};
