//! # Spreadsheet Export
//!
//! Dumps every billed invoice (dispatch transaction) to CSV: one row
//! per invoice with client, product, quantity, rate, total, and profit
//! columns, ready for a spreadsheet application.
//!
//! Clients and products are looked up live for contact/unit columns;
//! a row whose client or product has meanwhile been edited away falls
//! back to placeholder text rather than dropping the invoice — the
//! export is a historical record, not a join over current state.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use billstock_core::{Ledger, TransactionKind};

use crate::error::{ExportError, ExportResult};

// =============================================================================
// Row Model
// =============================================================================

/// One exported invoice line. Field renames are the spreadsheet's
/// column headers.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceRow {
    #[serde(rename = "Invoice ID")]
    pub invoice_id: String,

    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Client Name")]
    pub client_name: String,

    #[serde(rename = "Client Phone")]
    pub client_phone: String,

    #[serde(rename = "Product")]
    pub product: String,

    #[serde(rename = "Quantity")]
    pub quantity: f64,

    #[serde(rename = "Unit")]
    pub unit: String,

    #[serde(rename = "Rate (INR)")]
    pub rate: f64,

    #[serde(rename = "Total Amount (INR)")]
    pub total: f64,

    #[serde(rename = "Profit (INR)")]
    pub profit: f64,
}

// =============================================================================
// Export
// =============================================================================

/// Collects the CSV rows: every dispatch transaction, newest first
/// (ledger order).
pub fn invoice_rows(ledger: &Ledger) -> Vec<InvoiceRow> {
    ledger
        .transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Dispatch)
        .map(|t| {
            let client = t.client_id.as_deref().and_then(|id| ledger.client(id));
            let product = ledger.product(&t.product_id);

            InvoiceRow {
                invoice_id: t.bill_number.clone().unwrap_or_else(|| "N/A".to_string()),
                date: format_row_date(t.timestamp),
                client_name: client
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| "Unknown Client".to_string()),
                client_phone: client.map(|c| c.phone.clone()).unwrap_or_default(),
                product: t.product_name.clone(),
                quantity: t.quantity,
                unit: product.map(|p| p.unit.to_string()).unwrap_or_default(),
                rate: t.rate,
                total: t.total,
                profit: t.profit.unwrap_or(0.0),
            }
        })
        .collect()
}

/// Serializes all dispatch invoices to CSV text.
///
/// An export with zero invoices is refused with
/// [`ExportError::NoData`] so the caller can tell the user instead of
/// producing a header-only file.
pub fn export_invoices_csv(ledger: &Ledger) -> ExportResult<String> {
    let rows = invoice_rows(ledger);
    if rows.is_empty() {
        return Err(ExportError::NoData);
    }

    let mut writer = csv::Writer::from_writer(vec![]);
    for row in &rows {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;
    // csv output over our string/f64 rows is always valid UTF-8
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Export file name, stamped with today's date:
/// `Invoices_Export_2026-08-06.csv`.
pub fn export_file_name() -> String {
    format!("Invoices_Export_{}.csv", Utc::now().format("%Y-%m-%d"))
}

/// Writes the CSV into `out_dir`, returning the document path.
pub fn write_invoices_csv(ledger: &Ledger, out_dir: &Path) -> ExportResult<PathBuf> {
    let csv_text = export_invoices_csv(ledger)?;

    fs::create_dir_all(out_dir).map_err(|e| ExportError::io(out_dir, e))?;
    let path = out_dir.join(export_file_name());
    fs::write(&path, csv_text).map_err(|e| ExportError::io(&path, e))?;

    info!(path = %path.display(), "Invoice spreadsheet written");
    Ok(path)
}

/// Spreadsheet date column: `15/01/2024`.
fn format_row_date(timestamp_ms: i64) -> String {
    let datetime = DateTime::from_timestamp_millis(timestamp_ms).unwrap_or(DateTime::UNIX_EPOCH);
    datetime.format("%d/%m/%Y").to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
