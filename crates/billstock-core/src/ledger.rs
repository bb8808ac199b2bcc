//! # Ledger Engine
//!
//! Pure, side-effect-free queries over a [`Ledger`] snapshot. No
//! mutation, no I/O — every figure on the dashboard and client views is
//! derived here by O(n) scans over the transaction list.
//!
//! ## Derived Quantities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ledger Engine Queries                            │
//! │                                                                         │
//! │  transactions ──┬──► client_stock_balance(client, product)             │
//! │                 │      Σ dispatch qty − Σ client_sale qty              │
//! │                 │                                                       │
//! │                 ├──► client_performance(client)                        │
//! │                 │      revenue, units sold/provided, efficiency,       │
//! │                 │      per-product {provided, sold, in_hand}           │
//! │                 │                                                       │
//! │                 └──► dashboard_totals()                                │
//! │                        gross sales, net profit, market reach,          │
//! │                        asset spend                                     │
//! │                                                                         │
//! │  purchases ────────► weighted_average_cost(...)                        │
//! │                        the moving-average inventory costing formula    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{LedgerError, LedgerResult};
use crate::types::{Client, Ledger, Transaction, TransactionKind, Unit};

/// How many transactions `recent_activity` keeps per client.
const RECENT_ACTIVITY_LIMIT: usize = 5;

// =============================================================================
// Weighted-Average Cost
// =============================================================================

/// Standard moving-average inventory costing.
///
/// Returns `((existing_stock × existing_rate) + (incoming_qty × incoming_rate))
/// / (existing_stock + incoming_qty)` when the combined quantity is
/// positive, else `incoming_rate`. Never divides by zero.
///
/// ## Example
/// ```rust
/// use billstock_core::weighted_average_cost;
///
/// // 10 units held at 5, buying 10 more at 7 → average 6
/// assert_eq!(weighted_average_cost(10.0, 5.0, 10.0, 7.0), 6.0);
///
/// // Empty shelf adopts the purchase rate exactly
/// assert_eq!(weighted_average_cost(0.0, 0.0, 25.0, 9.5), 9.5);
/// ```
pub fn weighted_average_cost(
    existing_stock: f64,
    existing_rate: f64,
    incoming_qty: f64,
    incoming_rate: f64,
) -> f64 {
    let combined = existing_stock + incoming_qty;
    if combined > 0.0 {
        ((existing_stock * existing_rate) + (incoming_qty * incoming_rate)) / combined
    } else {
        incoming_rate
    }
}

// =============================================================================
// Client Performance
// =============================================================================

/// Per-product slice of a client's held stock.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ClientProductSummary {
    pub product_id: String,
    pub name: String,
    pub unit: Unit,

    /// Total quantity dispatched to the client.
    pub provided: f64,

    /// Total quantity the client reported as sold.
    pub sold: f64,

    /// `provided − sold`: what the client still holds.
    pub in_hand: f64,
}

/// Aggregated view of one client's trading history.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ClientPerformance {
    pub client: Client,

    /// Per-product breakdown, restricted to products the client was
    /// actually given stock of (`provided > 0`).
    pub stock_summary: Vec<ClientProductSummary>,

    /// Σ client_sale totals. Dispatch revenue deliberately does not
    /// count — only what the client sold onward is "revenue".
    pub total_revenue: f64,

    /// Σ client_sale quantities.
    pub total_units_sold: f64,

    /// Σ dispatch quantities.
    pub total_units_provided: f64,

    /// `sold ÷ provided × 100`; 0 when nothing was provided.
    pub sales_efficiency: f64,

    /// The client's five most recent transactions, newest first.
    pub recent_activity: Vec<Transaction>,
}

// =============================================================================
// Dashboard Totals
// =============================================================================

/// The four headline figures on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTotals {
    /// Σ dispatch totals — billed revenue.
    pub gross_sales: f64,

    /// Σ dispatch profit snapshots.
    pub net_profit: f64,

    /// Σ client_sale totals — what clients moved onward.
    pub market_reach: f64,

    /// Σ purchase totals — money sunk into stock.
    pub asset_spend: f64,
}

// =============================================================================
// Queries
// =============================================================================

impl Ledger {
    /// Net stock a client currently holds for one product:
    /// Σ dispatch quantities − Σ client_sale quantities over all
    /// transactions for the (client, product) pair.
    ///
    /// Returns 0 when nothing matches. A negative result means the
    /// transaction history is inconsistent; it is returned as-is so
    /// callers can surface a data-integrity warning instead of crashing.
    pub fn client_stock_balance(&self, client_id: &str, product_id: &str) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.client_id.as_deref() == Some(client_id) && t.product_id == product_id)
            .map(|t| match t.kind {
                TransactionKind::Dispatch => t.quantity,
                TransactionKind::ClientSale => -t.quantity,
                TransactionKind::Purchase => 0.0,
            })
            .sum()
    }

    /// Aggregates one client's history into a [`ClientPerformance`].
    pub fn client_performance(&self, client_id: &str) -> LedgerResult<ClientPerformance> {
        let client = self
            .client(client_id)
            .ok_or_else(|| LedgerError::ClientNotFound(client_id.to_string()))?;

        let client_transactions: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.client_id.as_deref() == Some(client_id))
            .collect();

        let provided_for = |product_id: &str| -> f64 {
            client_transactions
                .iter()
                .filter(|t| t.kind == TransactionKind::Dispatch && t.product_id == product_id)
                .map(|t| t.quantity)
                .sum()
        };
        let sold_for = |product_id: &str| -> f64 {
            client_transactions
                .iter()
                .filter(|t| t.kind == TransactionKind::ClientSale && t.product_id == product_id)
                .map(|t| t.quantity)
                .sum()
        };

        let stock_summary: Vec<ClientProductSummary> = self
            .inventory
            .iter()
            .map(|p| {
                let provided = provided_for(&p.id);
                let sold = sold_for(&p.id);
                ClientProductSummary {
                    product_id: p.id.clone(),
                    name: p.name.clone(),
                    unit: p.unit,
                    provided,
                    sold,
                    in_hand: provided - sold,
                }
            })
            .filter(|s| s.provided > 0.0)
            .collect();

        let total_revenue: f64 = client_transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::ClientSale)
            .map(|t| t.total)
            .sum();
        let total_units_sold: f64 = client_transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::ClientSale)
            .map(|t| t.quantity)
            .sum();
        let total_units_provided: f64 = client_transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Dispatch)
            .map(|t| t.quantity)
            .sum();

        let sales_efficiency = if total_units_provided > 0.0 {
            (total_units_sold / total_units_provided) * 100.0
        } else {
            0.0
        };

        let mut recent_activity: Vec<Transaction> =
            client_transactions.iter().map(|t| (*t).clone()).collect();
        recent_activity.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        recent_activity.truncate(RECENT_ACTIVITY_LIMIT);

        Ok(ClientPerformance {
            client: client.clone(),
            stock_summary,
            total_revenue,
            total_units_sold,
            total_units_provided,
            sales_efficiency,
            recent_activity,
        })
    }

    /// [`client_performance`](Self::client_performance) for every
    /// registered client, in registration order.
    pub fn client_performances(&self) -> Vec<ClientPerformance> {
        self.clients
            .iter()
            .filter_map(|c| self.client_performance(&c.id).ok())
            .collect()
    }

    /// The dashboard's headline totals, scanned fresh from the
    /// transaction list.
    pub fn dashboard_totals(&self) -> DashboardTotals {
        let mut totals = DashboardTotals {
            gross_sales: 0.0,
            net_profit: 0.0,
            market_reach: 0.0,
            asset_spend: 0.0,
        };

        for t in &self.transactions {
            match t.kind {
                TransactionKind::Dispatch => {
                    totals.gross_sales += t.total;
                    totals.net_profit += t.profit.unwrap_or(0.0);
                }
                TransactionKind::ClientSale => totals.market_reach += t.total,
                TransactionKind::Purchase => totals.asset_spend += t.total,
            }
        }

        totals
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
