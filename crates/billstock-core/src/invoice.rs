//! # Invoice Snapshots
//!
//! The data contract between the ledger and the export collaborators.
//!
//! A successful dispatch produces an [`InvoiceData`] — a frozen,
//! self-contained copy of everything a document needs (company, client,
//! line item, formatted date). The ledger's contract with the document
//! generators is purely "pass a consistent snapshot"; layout is the
//! export layer's problem.
//!
//! ## Fire-and-Forget
//! Document generation happens strictly *after* the dispatch is
//! committed. A [`DispatchListener`] that fails must not — and cannot —
//! roll back the transaction it was notified about.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Unit;

// =============================================================================
// Invoice Data
// =============================================================================

/// Client block printed on the invoice (frozen at dispatch time).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceClient {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// The single line item an invoice bills.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub name: String,
    pub quantity: f64,
    pub rate: f64,
    pub total: f64,
    pub unit: Unit,
}

/// Everything a generated invoice document needs.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceData {
    pub company_name: String,

    /// `INV-{n}`, allocated by the dispatch that produced this snapshot.
    pub bill_number: String,

    pub client: InvoiceClient,
    pub product: InvoiceLine,

    /// Human-readable dispatch date, already formatted for print.
    pub date: String,
}

// =============================================================================
// Dispatch Listener
// =============================================================================

/// Post-commit hook for dispatch events.
///
/// Implemented by the export layer (PDF writer) or by tests. Invoked
/// once per committed dispatch with the invoice snapshot; any failure
/// inside the listener is the listener's to report — the ledger has
/// already moved on.
pub trait DispatchListener {
    fn on_dispatch(&self, invoice: &InvoiceData);
}

// =============================================================================
// Date Formatting
// =============================================================================

/// Formats an epoch-millisecond timestamp the way invoices print it:
/// `06 Aug 2026, 02:30 PM`.
///
/// Timestamps predating the epoch or overflowing chrono's range fall
/// back to the epoch rather than panicking; they cannot occur through
/// the mutation API but may exist in a hand-edited blob.
pub fn format_invoice_date(timestamp_ms: i64) -> String {
    let datetime = DateTime::from_timestamp_millis(timestamp_ms).unwrap_or(DateTime::UNIX_EPOCH);
    datetime.format("%d %b %Y, %I:%M %p").to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_invoice_date() {
        // 2024-01-15 10:30:00 UTC
        assert_eq!(format_invoice_date(1_705_314_600_000), "15 Jan 2024, 10:30 AM");
        // Afternoon rolls to the 12-hour clock
        assert_eq!(format_invoice_date(1_705_332_600_000), "15 Jan 2024, 03:30 PM");
    }

    #[test]
    fn test_format_invoice_date_out_of_range_falls_back() {
        assert_eq!(format_invoice_date(i64::MAX), "01 Jan 1970, 12:00 AM");
    }

    #[test]
    fn test_invoice_data_wire_shape() {
        let invoice = InvoiceData {
            company_name: "NexGen Solutions".to_string(),
            bill_number: "INV-1001".to_string(),
            client: InvoiceClient {
                name: "Sharma Traders".to_string(),
                phone: "98765".to_string(),
                address: "Pune".to_string(),
            },
            product: InvoiceLine {
                name: "Basmati Rice".to_string(),
                quantity: 5.0,
                rate: 15.0,
                total: 75.0,
                unit: Unit::Kg,
            },
            date: "15 Jan 2024, 10:30 AM".to_string(),
        };

        let blob = serde_json::to_value(&invoice).unwrap();
        assert_eq!(blob["billNumber"], "INV-1001");
        assert_eq!(blob["companyName"], "NexGen Solutions");
        assert_eq!(blob["product"]["unit"], "kg");
    }
}
