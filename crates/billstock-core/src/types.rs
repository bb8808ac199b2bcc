//! # Domain Types
//!
//! Core domain types used throughout BillStock.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Client      │   │  Transaction    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  unit           │   │  name           │   │  kind           │       │
//! │  │  current_stock  │   │  phone          │   │  quantity/rate  │       │
//! │  │  avg_purchase…  │   │  address        │   │  profit (snap)  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  InventoryLog   │   │    Settings     │   │     Ledger      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  change (±)     │   │  company_name   │   │  all of the     │       │
//! │  │  reason         │   │  next_bill_no   │   │  above, in one  │       │
//! │  │  kind           │   │  (starts 1001)  │   │  JSON blob      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization Contract
//! The whole [`Ledger`] serializes to the persisted blob:
//! `{inventory, inventoryLogs, clients, transactions, settings}` — all
//! fields camelCase, timestamps as epoch milliseconds. The external
//! frontend consumes the same shapes, so every type here carries a ts-rs
//! export.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::STARTING_BILL_NO;

// =============================================================================
// Unit of Measure
// =============================================================================

/// Unit a product is stocked and billed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    Bags,
    Units,
    Liters,
}

/// Lowercase label, as printed on invoices and exports ("5 kg").
impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Unit::Kg => "kg",
            Unit::Bags => "bags",
            Unit::Units => "units",
            Unit::Liters => "liters",
        };
        write!(f, "{}", label)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A stocked item.
///
/// Stock and cost figures are `f64`: units include kg and liters, so
/// fractional quantities are legal, and the weighted-average cost formula
/// is defined over doubles.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4). Stable; never reused.
    pub id: String,

    /// Display label. Not guaranteed unique.
    pub name: String,

    /// Unit of measure.
    pub unit: Unit,

    /// Quantity on hand at the warehouse. Never negative: every mutation
    /// that would drive it below zero is rejected.
    pub current_stock: f64,

    /// Weighted-average unit cost, recomputed on every purchase.
    pub avg_purchase_rate: f64,

    /// Default unit sale price. User-editable and not authoritative —
    /// each transaction records its own rate.
    pub sale_rate: f64,

    /// Creation time (epoch milliseconds).
    pub created_at: i64,

    /// Last mutation time (epoch milliseconds).
    pub last_updated: i64,
}

// =============================================================================
// Client
// =============================================================================

/// A downstream partner who receives dispatched stock and may resell it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub created_at: i64,
}

// =============================================================================
// Transaction
// =============================================================================

/// What a ledger entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Stock bought into the warehouse.
    Purchase,
    /// Stock sent out to a client against a bill.
    Dispatch,
    /// A client reporting a sale out of stock they hold.
    ClientSale,
}

/// An immutable(-by-convention) ledger entry.
///
/// Uses the snapshot pattern: `product_name` and `profit` are frozen at
/// creation time and deliberately go stale if the product is later
/// renamed or its average cost changes. Only an explicit transaction
/// edit recomputes them.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,

    /// Present for dispatch and client_sale entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    pub product_id: String,

    /// Product name at the time of the transaction (frozen).
    pub product_name: String,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    pub quantity: f64,

    /// Unit rate agreed for this entry.
    pub rate: f64,

    /// Always `quantity × rate`.
    pub total: f64,

    /// Dispatch only: `(rate − avg_purchase_rate_at_time) × quantity`.
    /// A snapshot, never retroactively recalculated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit: Option<f64>,

    /// Dispatch only: sequential `INV-{n}` bill reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_number: Option<String>,

    /// Epoch milliseconds. Dispatches carry a caller-supplied timestamp
    /// (back-dated billing is allowed); everything else stamps itself.
    pub timestamp: i64,
}

// =============================================================================
// Inventory Log
// =============================================================================

/// Why a stock level changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Manual,
    Dispatch,
    Purchase,
}

/// An audit entry, distinct from [`Transaction`], recording *why* stock
/// changed.
///
/// Every stock-affecting mutation appends exactly one entry whose
/// `change` equals the net effect on `current_stock`. Append-only,
/// newest first.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLog {
    pub id: String,
    pub product_id: String,

    /// Product name at the time of the change (frozen).
    pub product_name: String,

    #[serde(rename = "type")]
    pub kind: LogKind,

    /// Signed stock delta applied to the product.
    pub change: f64,

    /// Free-text explanation shown in the audit view.
    pub reason: String,

    pub timestamp: i64,
}

// =============================================================================
// Settings
// =============================================================================

/// Global settings persisted with the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Printed on invoice headers.
    pub company_name: String,

    /// Next bill number to allocate. Monotonic; advanced exactly once
    /// per dispatch and never reused, even if a dispatch is edited.
    pub next_bill_no: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            company_name: String::new(),
            next_bill_no: STARTING_BILL_NO,
        }
    }
}

// =============================================================================
// Ledger (the Entity Store)
// =============================================================================

/// The entire application state: four collections plus settings.
///
/// ## Ordering
/// `transactions` and `inventory_logs` are kept newest-first; new entries
/// are prepended. `inventory` and `clients` keep registration order.
///
/// ## Mutation
/// All writes go through the operation methods in [`crate::ops`]; each
/// runs to completion against this single in-memory value before the
/// next begins (single logical writer, no interleaving).
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    pub inventory: Vec<Product>,
    pub inventory_logs: Vec<InventoryLog>,
    pub clients: Vec<Client>,
    pub transactions: Vec<Transaction>,
    pub settings: Settings,
}

impl Ledger {
    /// Looks up a product by id.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.inventory.iter().find(|p| p.id == id)
    }

    /// Looks up a client by id.
    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub(crate) fn client_mut(&mut self, id: &str) -> Option<&mut Client> {
        self.clients.iter_mut().find(|c| c.id == id)
    }

    /// Looks up a transaction by id.
    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }
}

// =============================================================================
// ID and Clock Helpers
// =============================================================================

/// Generates a fresh entity id (UUID v4 string).
pub fn new_entity_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current wall-clock time as epoch milliseconds, the ledger's native
/// timestamp representation.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_labels() {
        assert_eq!(Unit::Kg.to_string(), "kg");
        assert_eq!(Unit::Liters.to_string(), "liters");
        assert_eq!(serde_json::to_string(&Unit::Bags).unwrap(), "\"bags\"");
    }

    #[test]
    fn test_settings_default_bill_counter() {
        let settings = Settings::default();
        assert_eq!(settings.next_bill_no, 1001);
    }

    #[test]
    fn test_transaction_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::ClientSale).unwrap(),
            "\"client_sale\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionKind::Dispatch).unwrap(),
            "\"dispatch\""
        );
    }

    #[test]
    fn test_ledger_blob_shape() {
        // The persisted blob must keep the historical camelCase layout.
        let ledger = Ledger::default();
        let blob: serde_json::Value = serde_json::to_value(&ledger).unwrap();

        assert!(blob.get("inventory").is_some());
        assert!(blob.get("inventoryLogs").is_some());
        assert!(blob.get("clients").is_some());
        assert!(blob.get("transactions").is_some());
        assert_eq!(blob["settings"]["nextBillNo"], 1001);
        assert_eq!(blob["settings"]["companyName"], "");
    }

    #[test]
    fn test_transaction_optional_fields_omitted() {
        let tx = Transaction {
            id: "t1".to_string(),
            client_id: None,
            product_id: "p1".to_string(),
            product_name: "Rice".to_string(),
            kind: TransactionKind::Purchase,
            quantity: 10.0,
            rate: 5.0,
            total: 50.0,
            profit: None,
            bill_number: None,
            timestamp: 0,
        };
        let blob = serde_json::to_string(&tx).unwrap();

        // Purchases never carried clientId/profit/billNumber in the blob.
        assert!(!blob.contains("clientId"));
        assert!(!blob.contains("profit"));
        assert!(!blob.contains("billNumber"));
        assert!(blob.contains("\"type\":\"purchase\""));
        assert!(blob.contains("\"productName\":\"Rice\""));
    }
}
