//! # Mutation Operations
//!
//! The only way a [`Ledger`] changes. Each operation is one logical
//! transaction against the in-memory store: read current state,
//! validate, then produce the next consistent state (new transaction and
//! log entries plus updated product/settings records).
//!
//! ## Operation Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Mutation Operations                               │
//! │                                                                         │
//! │  register_product ──► Product (+ purchase Transaction + Log if stocked)│
//! │  register_client ───► Client                                           │
//! │  record_purchase ───► avg rate recompute, stock +, Transaction + Log   │
//! │  dispatch ──────────► profit snapshot, stock −, bill no, Tx + Log,     │
//! │                       InvoiceData out                                  │
//! │  report_client_sale ► client_sale Transaction (warehouse untouched)    │
//! │  edit_product ──────► field overwrite (+ manual Log on stock delta)    │
//! │  edit_client ───────► field overwrite                                  │
//! │  edit_transaction ──► inverse-then-reapply stock delta, totals redo    │
//! │  adjust_stock ──────► signed delta + mandatory reason + manual Log     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - **Validate then apply**: a returned error means nothing changed.
//! - **Audit completeness**: every change to `current_stock` appends
//!   exactly one [`InventoryLog`] whose `change` equals the applied delta.
//! - **Non-negative stock**: any operation that would drive a product's
//!   stock below zero is rejected, never clamped.
//! - **No idempotency**: every successful call appends new distinct
//!   entries; callers must not re-issue an operation to "recover".

use crate::error::{LedgerError, LedgerResult};
use crate::invoice::{format_invoice_date, InvoiceClient, InvoiceData, InvoiceLine};
use crate::ledger::weighted_average_cost;
use crate::types::{
    new_entity_id, now_millis, Client, InventoryLog, Ledger, LogKind, Product, Transaction,
    TransactionKind, Unit,
};
use crate::validation::{
    validate_name, validate_quantity, validate_rate, validate_reason, validate_stock_delta,
    validate_stock_level,
};
use crate::NEW_PRODUCT_MARKUP;

impl Ledger {
    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Prepends a ledger entry (newest first).
    fn push_transaction(&mut self, tx: Transaction) {
        self.transactions.insert(0, tx);
    }

    /// Prepends an audit entry (newest first).
    fn push_log(
        &mut self,
        product_id: &str,
        product_name: &str,
        kind: LogKind,
        change: f64,
        reason: String,
        timestamp: i64,
    ) {
        self.inventory_logs.insert(
            0,
            InventoryLog {
                id: new_entity_id(),
                product_id: product_id.to_string(),
                product_name: product_name.to_string(),
                kind,
                change,
                reason,
                timestamp,
            },
        );
    }

    fn product_index(&self, product_id: &str) -> LedgerResult<usize> {
        self.inventory
            .iter()
            .position(|p| p.id == product_id)
            .ok_or_else(|| LedgerError::ProductNotFound(product_id.to_string()))
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers a new product, optionally seeding opening stock.
    ///
    /// Opening stock is bookkept as a real purchase: a purchase
    /// [`Transaction`] and a purchase log are created alongside the
    /// product, so the asset-spend total and the audit trail both see it.
    /// A zero-stock registration still gets a change-0 manual log so the
    /// product's audit history has a starting point.
    ///
    /// Returns the new product's id.
    pub fn register_product(
        &mut self,
        name: &str,
        unit: Unit,
        stock: f64,
        purchase_rate: f64,
        sale_rate: f64,
    ) -> LedgerResult<String> {
        let name = validate_name(name, "name")?;
        validate_stock_level(stock)?;
        validate_rate(purchase_rate, "purchase rate")?;
        validate_rate(sale_rate, "sale rate")?;

        let now = now_millis();
        let product_id = new_entity_id();

        self.inventory.push(Product {
            id: product_id.clone(),
            name: name.clone(),
            unit,
            current_stock: stock,
            avg_purchase_rate: purchase_rate,
            sale_rate,
            created_at: now,
            last_updated: now,
        });

        if stock > 0.0 {
            self.push_transaction(Transaction {
                id: new_entity_id(),
                client_id: None,
                product_id: product_id.clone(),
                product_name: name.clone(),
                kind: TransactionKind::Purchase,
                quantity: stock,
                rate: purchase_rate,
                total: stock * purchase_rate,
                profit: None,
                bill_number: None,
                timestamp: now,
            });
            self.push_log(
                &product_id,
                &name,
                LogKind::Purchase,
                stock,
                format!("Initial stock acquisition @ ₹{}", purchase_rate),
                now,
            );
        } else {
            self.push_log(
                &product_id,
                &name,
                LogKind::Manual,
                0.0,
                "New product registration".to_string(),
                now,
            );
        }

        Ok(product_id)
    }

    /// Registers a new client. Returns the new client's id.
    pub fn register_client(
        &mut self,
        name: &str,
        phone: &str,
        address: &str,
    ) -> LedgerResult<String> {
        let name = validate_name(name, "name")?;

        let client_id = new_entity_id();
        self.clients.push(Client {
            id: client_id.clone(),
            name,
            phone: phone.trim().to_string(),
            address: address.trim().to_string(),
            created_at: now_millis(),
        });

        Ok(client_id)
    }

    // =========================================================================
    // Purchases
    // =========================================================================

    /// Records a stock purchase for an existing product.
    ///
    /// Recomputes the weighted-average cost *before* the stock increment
    /// — the formula folds the incoming lot into whatever is already on
    /// the shelf.
    pub fn record_purchase(
        &mut self,
        product_id: &str,
        quantity: f64,
        rate: f64,
    ) -> LedgerResult<()> {
        validate_quantity(quantity)?;
        validate_rate(rate, "rate")?;

        let idx = self.product_index(product_id)?;
        let now = now_millis();

        let new_rate = weighted_average_cost(
            self.inventory[idx].current_stock,
            self.inventory[idx].avg_purchase_rate,
            quantity,
            rate,
        );

        let (product_id, product_name) = {
            let p = &mut self.inventory[idx];
            p.avg_purchase_rate = new_rate;
            p.current_stock += quantity;
            p.last_updated = now;
            (p.id.clone(), p.name.clone())
        };

        self.push_transaction(Transaction {
            id: new_entity_id(),
            client_id: None,
            product_id: product_id.clone(),
            product_name: product_name.clone(),
            kind: TransactionKind::Purchase,
            quantity,
            rate,
            total: quantity * rate,
            profit: None,
            bill_number: None,
            timestamp: now,
        });
        self.push_log(
            &product_id,
            &product_name,
            LogKind::Purchase,
            quantity,
            format!("New purchase added (Rate: ₹{})", rate),
            now,
        );

        Ok(())
    }

    /// Records a purchase that also creates the product.
    ///
    /// The new product starts at the purchase rate with a default
    /// [`NEW_PRODUCT_MARKUP`] sale rate, then the lot flows through the
    /// normal purchase path. Returns the new product's id.
    pub fn record_purchase_new_product(
        &mut self,
        name: &str,
        unit: Unit,
        quantity: f64,
        rate: f64,
    ) -> LedgerResult<String> {
        let name = validate_name(name, "name")?;
        validate_quantity(quantity)?;
        validate_rate(rate, "rate")?;

        let now = now_millis();
        let product_id = new_entity_id();
        self.inventory.push(Product {
            id: product_id.clone(),
            name,
            unit,
            current_stock: 0.0,
            avg_purchase_rate: rate,
            sale_rate: rate * NEW_PRODUCT_MARKUP,
            created_at: now,
            last_updated: now,
        });

        self.record_purchase(&product_id, quantity, rate)?;
        Ok(product_id)
    }

    // =========================================================================
    // Dispatch & Client Sales
    // =========================================================================

    /// Dispatches stock to a client against a freshly allocated bill.
    ///
    /// The profit figure is frozen here from the product's *current*
    /// average cost; later purchases never touch it. The bill counter
    /// advances exactly once, even if the dispatch is edited afterwards.
    ///
    /// `timestamp` is caller-supplied: back-dated billing is a normal
    /// workflow. Returns the [`InvoiceData`] snapshot for the document
    /// collaborator — generation happens strictly after this commit.
    pub fn dispatch(
        &mut self,
        client_id: &str,
        product_id: &str,
        quantity: f64,
        rate: f64,
        timestamp: i64,
    ) -> LedgerResult<InvoiceData> {
        validate_quantity(quantity)?;
        validate_rate(rate, "rate")?;

        let client = self
            .client(client_id)
            .ok_or_else(|| LedgerError::ClientNotFound(client_id.to_string()))?
            .clone();
        let idx = self.product_index(product_id)?;
        let product = self.inventory[idx].clone();

        if product.current_stock < quantity {
            return Err(LedgerError::InsufficientStock {
                name: product.name,
                available: product.current_stock,
                requested: quantity,
            });
        }

        let bill_number = format!("INV-{}", self.settings.next_bill_no);
        let total = quantity * rate;
        let profit = (rate - product.avg_purchase_rate) * quantity;
        let now = now_millis();

        self.push_transaction(Transaction {
            id: new_entity_id(),
            client_id: Some(client.id.clone()),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            kind: TransactionKind::Dispatch,
            quantity,
            rate,
            total,
            profit: Some(profit),
            bill_number: Some(bill_number.clone()),
            timestamp,
        });

        {
            let p = &mut self.inventory[idx];
            p.current_stock -= quantity;
            p.last_updated = now;
        }
        self.settings.next_bill_no += 1;

        self.push_log(
            &product.id,
            &product.name,
            LogKind::Dispatch,
            -quantity,
            format!("Dispatched to client: {} (Ref: {})", client.name, bill_number),
            now,
        );

        Ok(InvoiceData {
            company_name: self.settings.company_name.clone(),
            bill_number,
            client: InvoiceClient {
                name: client.name,
                phone: client.phone,
                address: client.address,
            },
            product: InvoiceLine {
                name: product.name,
                quantity,
                rate,
                total,
                unit: product.unit,
            },
            date: format_invoice_date(timestamp),
        })
    }

    /// Records a client reporting a sale out of stock they hold.
    ///
    /// Warehouse stock is untouched and no inventory log is written —
    /// the goods already left at dispatch time. Rejected when the
    /// client's held balance cannot cover the quantity.
    pub fn report_client_sale(
        &mut self,
        client_id: &str,
        product_id: &str,
        quantity: f64,
        rate: f64,
    ) -> LedgerResult<()> {
        validate_quantity(quantity)?;
        validate_rate(rate, "rate")?;

        let client_name = self
            .client(client_id)
            .ok_or_else(|| LedgerError::ClientNotFound(client_id.to_string()))?
            .name
            .clone();
        let idx = self.product_index(product_id)?;
        let product_name = self.inventory[idx].name.clone();

        let balance = self.client_stock_balance(client_id, product_id);
        if balance < quantity {
            return Err(LedgerError::InsufficientClientStock {
                client: client_name,
                product: product_name,
                available: balance,
                requested: quantity,
            });
        }

        self.push_transaction(Transaction {
            id: new_entity_id(),
            client_id: Some(client_id.to_string()),
            product_id: product_id.to_string(),
            product_name,
            kind: TransactionKind::ClientSale,
            quantity,
            rate,
            total: quantity * rate,
            profit: None,
            bill_number: None,
            timestamp: now_millis(),
        });

        Ok(())
    }

    // =========================================================================
    // Edits
    // =========================================================================

    /// Overwrites a product's fields directly.
    ///
    /// A changed stock value is an implicit manual adjustment, so the
    /// delta is audit-logged before the overwrite.
    pub fn edit_product(
        &mut self,
        product_id: &str,
        name: &str,
        unit: Unit,
        stock: f64,
        purchase_rate: f64,
        sale_rate: f64,
    ) -> LedgerResult<()> {
        let name = validate_name(name, "name")?;
        validate_stock_level(stock)?;
        validate_rate(purchase_rate, "purchase rate")?;
        validate_rate(sale_rate, "sale rate")?;

        let idx = self.product_index(product_id)?;
        let now = now_millis();
        let old_stock = self.inventory[idx].current_stock;

        let stock_diff = stock - old_stock;
        if stock_diff != 0.0 {
            self.push_log(
                product_id,
                &name,
                LogKind::Manual,
                stock_diff,
                format!("Manual stock edit from {} to {}", old_stock, stock),
                now,
            );
        }

        let p = &mut self.inventory[idx];
        p.name = name;
        p.unit = unit;
        p.current_stock = stock;
        p.avg_purchase_rate = purchase_rate;
        p.sale_rate = sale_rate;
        p.last_updated = now;

        Ok(())
    }

    /// Overwrites a client's contact fields.
    pub fn edit_client(
        &mut self,
        client_id: &str,
        name: &str,
        phone: &str,
        address: &str,
    ) -> LedgerResult<()> {
        let name = validate_name(name, "name")?;

        let client = self
            .client_mut(client_id)
            .ok_or_else(|| LedgerError::ClientNotFound(client_id.to_string()))?;
        client.name = name;
        client.phone = phone.trim().to_string();
        client.address = address.trim().to_string();

        Ok(())
    }

    /// Amends a recorded transaction.
    ///
    /// The stock delta implied by the quantity change (`new − old`) is
    /// inverse-then-reapplied to the referenced product: a dispatch
    /// consumes more stock as its quantity grows, a purchase gains more,
    /// a client sale never touches the warehouse. `total` is recomputed;
    /// a dispatch's `profit` is recomputed from the product's *current*
    /// average cost (the one deliberate exception to the snapshot rule).
    /// The bill number is never reassigned.
    pub fn edit_transaction(
        &mut self,
        transaction_id: &str,
        client_id: Option<&str>,
        product_id: &str,
        quantity: f64,
        rate: f64,
    ) -> LedgerResult<()> {
        validate_quantity(quantity)?;
        validate_rate(rate, "rate")?;

        let tx_idx = self
            .transactions
            .iter()
            .position(|t| t.id == transaction_id)
            .ok_or_else(|| LedgerError::TransactionNotFound(transaction_id.to_string()))?;
        let (old_kind, old_qty, old_ref) = {
            let tx = &self.transactions[tx_idx];
            (
                tx.kind,
                tx.quantity,
                tx.bill_number.clone().unwrap_or_else(|| tx.id.clone()),
            )
        };

        if let Some(cid) = client_id {
            if self.client(cid).is_none() {
                return Err(LedgerError::ClientNotFound(cid.to_string()));
            }
        }
        let idx = self.product_index(product_id)?;

        let diff = quantity - old_qty;
        let stock_delta = match old_kind {
            TransactionKind::Dispatch => -diff,
            TransactionKind::Purchase => diff,
            TransactionKind::ClientSale => 0.0,
        };

        let old_stock = self.inventory[idx].current_stock;
        let new_stock = old_stock + stock_delta;
        if stock_delta != 0.0 && new_stock < 0.0 {
            return Err(LedgerError::InsufficientStock {
                name: self.inventory[idx].name.clone(),
                available: old_stock,
                requested: -stock_delta,
            });
        }

        let now = now_millis();
        let (product_name, avg_rate) = {
            let p = &mut self.inventory[idx];
            if stock_delta != 0.0 {
                p.current_stock = new_stock;
                p.last_updated = now;
            }
            (p.name.clone(), p.avg_purchase_rate)
        };

        {
            let tx = &mut self.transactions[tx_idx];
            if let Some(cid) = client_id {
                tx.client_id = Some(cid.to_string());
            }
            tx.product_id = product_id.to_string();
            tx.product_name = product_name.clone();
            tx.quantity = quantity;
            tx.rate = rate;
            tx.total = quantity * rate;
            if old_kind == TransactionKind::Dispatch {
                tx.profit = Some((rate - avg_rate) * quantity);
            }
        }

        if stock_delta != 0.0 {
            self.push_log(
                product_id,
                &product_name,
                LogKind::Manual,
                stock_delta,
                format!("Quantity on {} revised from {} to {}", old_ref, old_qty, quantity),
                now,
            );
        }

        Ok(())
    }

    // =========================================================================
    // Manual Adjustment
    // =========================================================================

    /// Applies a signed delta to a product's stock with a mandatory
    /// free-text reason.
    ///
    /// A delta that would drive the level below zero is rejected — the
    /// audit log records exactly what was applied, and a clamped value
    /// would break that equality.
    pub fn adjust_stock(
        &mut self,
        product_id: &str,
        change: f64,
        reason: &str,
    ) -> LedgerResult<()> {
        let reason = validate_reason(reason)?;
        validate_stock_delta(change)?;

        let idx = self.product_index(product_id)?;
        let old_stock = self.inventory[idx].current_stock;
        let new_stock = old_stock + change;
        if new_stock < 0.0 {
            return Err(LedgerError::InsufficientStock {
                name: self.inventory[idx].name.clone(),
                available: old_stock,
                requested: -change,
            });
        }

        let now = now_millis();
        let (product_id, product_name) = {
            let p = &mut self.inventory[idx];
            p.current_stock = new_stock;
            p.last_updated = now;
            (p.id.clone(), p.name.clone())
        };

        self.push_log(&product_id, &product_name, LogKind::Manual, change, reason, now);

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn stocked_ledger() -> (Ledger, String, String) {
        let mut ledger = Ledger::default();
        let product = ledger
            .register_product("Basmati Rice", Unit::Kg, 0.0, 10.0, 15.0)
            .unwrap();
        let client = ledger
            .register_client("Sharma Traders", "98765", "Pune")
            .unwrap();
        ledger.record_purchase(&product, 20.0, 10.0).unwrap();
        (ledger, product, client)
    }

    #[test]
    fn test_register_product_with_opening_stock() {
        let mut ledger = Ledger::default();
        let id = ledger
            .register_product("Wheat", Unit::Bags, 50.0, 8.0, 12.0)
            .unwrap();

        let product = ledger.product(&id).unwrap();
        assert_eq!(product.current_stock, 50.0);
        assert_eq!(product.avg_purchase_rate, 8.0);

        // Opening stock shows up as a real purchase plus its audit entry.
        assert_eq!(ledger.transactions.len(), 1);
        assert_eq!(ledger.transactions[0].kind, TransactionKind::Purchase);
        assert_eq!(ledger.transactions[0].total, 400.0);

        assert_eq!(ledger.inventory_logs.len(), 1);
        assert_eq!(ledger.inventory_logs[0].kind, LogKind::Purchase);
        assert_eq!(ledger.inventory_logs[0].change, 50.0);
    }

    #[test]
    fn test_register_product_without_stock() {
        let mut ledger = Ledger::default();
        ledger
            .register_product("Wheat", Unit::Bags, 0.0, 8.0, 12.0)
            .unwrap();

        assert!(ledger.transactions.is_empty());
        assert_eq!(ledger.inventory_logs.len(), 1);
        assert_eq!(ledger.inventory_logs[0].kind, LogKind::Manual);
        assert_eq!(ledger.inventory_logs[0].change, 0.0);
    }

    #[test]
    fn test_register_product_requires_name() {
        let mut ledger = Ledger::default();
        assert!(matches!(
            ledger.register_product("  ", Unit::Kg, 0.0, 1.0, 2.0),
            Err(LedgerError::Validation(_))
        ));
        assert!(ledger.inventory.is_empty());
        assert!(ledger.inventory_logs.is_empty());
    }

    #[test]
    fn test_purchase_recomputes_weighted_average() {
        let mut ledger = Ledger::default();
        let id = ledger
            .register_product("Rice", Unit::Kg, 10.0, 5.0, 9.0)
            .unwrap();

        // Spec anchor: 10 @ 5 plus 10 @ 7 → average 6.
        ledger.record_purchase(&id, 10.0, 7.0).unwrap();

        let product = ledger.product(&id).unwrap();
        assert_eq!(product.avg_purchase_rate, 6.0);
        assert_eq!(product.current_stock, 20.0);
    }

    #[test]
    fn test_purchase_into_empty_stock_adopts_rate() {
        let mut ledger = Ledger::default();
        let id = ledger
            .register_product("Rice", Unit::Kg, 0.0, 0.0, 9.0)
            .unwrap();

        ledger.record_purchase(&id, 15.0, 7.25).unwrap();
        assert_eq!(ledger.product(&id).unwrap().avg_purchase_rate, 7.25);
    }

    #[test]
    fn test_purchase_unknown_product_is_explicit_error() {
        let mut ledger = Ledger::default();
        assert!(matches!(
            ledger.record_purchase("ghost", 5.0, 1.0),
            Err(LedgerError::ProductNotFound(_))
        ));
        assert!(ledger.transactions.is_empty());
        assert!(ledger.inventory_logs.is_empty());
    }

    #[test]
    fn test_purchase_new_product_applies_markup() {
        let mut ledger = Ledger::default();
        let id = ledger
            .record_purchase_new_product("Jaggery", Unit::Kg, 30.0, 10.0)
            .unwrap();

        let product = ledger.product(&id).unwrap();
        assert_eq!(product.current_stock, 30.0);
        assert_eq!(product.avg_purchase_rate, 10.0);
        assert_eq!(product.sale_rate, 12.0); // 10 × 1.2 default markup

        assert_eq!(ledger.transactions.len(), 1);
        assert_eq!(ledger.inventory_logs.len(), 1);
    }

    #[test]
    fn test_stock_conservation() {
        let (mut ledger, product, client) = stocked_ledger();

        ledger.record_purchase(&product, 30.0, 12.0).unwrap();
        ledger.dispatch(&client, &product, 5.0, 15.0, 1).unwrap();
        ledger.record_purchase(&product, 10.0, 11.0).unwrap();
        ledger.dispatch(&client, &product, 8.0, 16.0, 2).unwrap();

        // S₀ (20) + purchases (40) − dispatches (13)
        assert_eq!(ledger.product(&product).unwrap().current_stock, 47.0);
    }

    #[test]
    fn test_dispatch_allocates_sequential_bills() {
        let (mut ledger, product, client) = stocked_ledger();

        let a = ledger.dispatch(&client, &product, 2.0, 15.0, 1).unwrap();
        let b = ledger.dispatch(&client, &product, 2.0, 15.0, 2).unwrap();
        let c = ledger.dispatch(&client, &product, 2.0, 15.0, 3).unwrap();

        assert_eq!(a.bill_number, "INV-1001");
        assert_eq!(b.bill_number, "INV-1002");
        assert_eq!(c.bill_number, "INV-1003");
        assert_eq!(ledger.settings.next_bill_no, 1004);
    }

    #[test]
    fn test_dispatch_freezes_profit_and_builds_invoice() {
        let (mut ledger, product, client) = stocked_ledger();

        let invoice = ledger.dispatch(&client, &product, 5.0, 15.0, 42).unwrap();
        assert_eq!(invoice.product.total, 75.0);
        assert_eq!(invoice.client.name, "Sharma Traders");
        assert_eq!(invoice.product.unit, Unit::Kg);

        let tx = &ledger.transactions[0];
        assert_eq!(tx.kind, TransactionKind::Dispatch);
        assert_eq!(tx.profit, Some(25.0)); // (15 − 10) × 5
        assert_eq!(tx.timestamp, 42);
        assert_eq!(tx.bill_number.as_deref(), Some("INV-1001"));
    }

    #[test]
    fn test_dispatch_insufficient_stock_changes_nothing() {
        let (mut ledger, product, client) = stocked_ledger();
        let transactions_before = ledger.transactions.len();
        let logs_before = ledger.inventory_logs.len();

        let result = ledger.dispatch(&client, &product, 25.0, 15.0, 1);
        assert!(matches!(result, Err(LedgerError::InsufficientStock { .. })));

        assert_eq!(ledger.product(&product).unwrap().current_stock, 20.0);
        assert_eq!(ledger.transactions.len(), transactions_before);
        assert_eq!(ledger.inventory_logs.len(), logs_before);
        assert_eq!(ledger.settings.next_bill_no, 1001);
    }

    #[test]
    fn test_dispatch_unknown_client_or_product() {
        let (mut ledger, product, client) = stocked_ledger();

        assert!(matches!(
            ledger.dispatch("ghost", &product, 1.0, 15.0, 1),
            Err(LedgerError::ClientNotFound(_))
        ));
        assert!(matches!(
            ledger.dispatch(&client, "ghost", 1.0, 15.0, 1),
            Err(LedgerError::ProductNotFound(_))
        ));
        assert_eq!(ledger.settings.next_bill_no, 1001);
    }

    #[test]
    fn test_client_sale_requires_held_balance() {
        let (mut ledger, product, client) = stocked_ledger();

        // Nothing dispatched yet: any sale quantity must be rejected.
        let result = ledger.report_client_sale(&client, &product, 1.0, 18.0);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientClientStock { .. })
        ));
        assert_eq!(ledger.transactions.len(), 1); // only the seed purchase

        ledger.dispatch(&client, &product, 5.0, 15.0, 1).unwrap();
        ledger.report_client_sale(&client, &product, 3.0, 18.0).unwrap();

        // 5 provided − 3 sold leaves 2; selling 3 more would go negative.
        let result = ledger.report_client_sale(&client, &product, 3.0, 18.0);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientClientStock { available, .. }) if available == 2.0
        ));
    }

    #[test]
    fn test_client_sale_leaves_warehouse_untouched() {
        let (mut ledger, product, client) = stocked_ledger();
        ledger.dispatch(&client, &product, 5.0, 15.0, 1).unwrap();
        let logs_before = ledger.inventory_logs.len();

        ledger.report_client_sale(&client, &product, 2.0, 18.0).unwrap();

        assert_eq!(ledger.product(&product).unwrap().current_stock, 15.0);
        assert_eq!(ledger.inventory_logs.len(), logs_before); // no log: warehouse unaffected
    }

    #[test]
    fn test_edit_product_logs_stock_delta() {
        let (mut ledger, product, _) = stocked_ledger();
        let logs_before = ledger.inventory_logs.len();

        ledger
            .edit_product(&product, "Basmati Rice Gold", Unit::Kg, 26.0, 10.0, 16.0)
            .unwrap();

        let p = ledger.product(&product).unwrap();
        assert_eq!(p.name, "Basmati Rice Gold");
        assert_eq!(p.current_stock, 26.0);
        assert_eq!(p.sale_rate, 16.0);

        assert_eq!(ledger.inventory_logs.len(), logs_before + 1);
        let log = &ledger.inventory_logs[0];
        assert_eq!(log.kind, LogKind::Manual);
        assert_eq!(log.change, 6.0);
    }

    #[test]
    fn test_edit_product_same_stock_skips_log() {
        let (mut ledger, product, _) = stocked_ledger();
        let logs_before = ledger.inventory_logs.len();

        ledger
            .edit_product(&product, "Basmati Rice", Unit::Kg, 20.0, 10.0, 14.0)
            .unwrap();

        assert_eq!(ledger.inventory_logs.len(), logs_before);
    }

    #[test]
    fn test_profit_snapshot_survives_cost_changes() {
        let (mut ledger, product, client) = stocked_ledger();
        ledger.dispatch(&client, &product, 5.0, 15.0, 1).unwrap();
        let dispatch_id = ledger.transactions[0].id.clone();
        assert_eq!(ledger.transactions[0].profit, Some(25.0));

        // A pricier purchase moves the average cost...
        ledger.record_purchase(&product, 15.0, 20.0).unwrap();
        assert!(ledger.product(&product).unwrap().avg_purchase_rate > 10.0);

        // ...but the recorded profit is a snapshot and must not move.
        let dispatch = ledger.transaction(&dispatch_id).unwrap();
        assert_eq!(dispatch.profit, Some(25.0));
    }

    #[test]
    fn test_edit_client() {
        let (mut ledger, _, client) = stocked_ledger();

        ledger
            .edit_client(&client, "Sharma & Sons", "91234", "Mumbai")
            .unwrap();

        let c = ledger.client(&client).unwrap();
        assert_eq!(c.name, "Sharma & Sons");
        assert_eq!(c.phone, "91234");
        assert_eq!(c.address, "Mumbai");

        assert!(matches!(
            ledger.edit_client("ghost", "X", "", ""),
            Err(LedgerError::ClientNotFound(_))
        ));
    }

    #[test]
    fn test_edit_dispatch_transaction_reapplies_stock() {
        let (mut ledger, product, client) = stocked_ledger();
        ledger.dispatch(&client, &product, 5.0, 15.0, 1).unwrap();
        let tx_id = ledger.transactions[0].id.clone();
        assert_eq!(ledger.product(&product).unwrap().current_stock, 15.0);

        // Growing the dispatch from 5 to 8 consumes 3 more units.
        ledger
            .edit_transaction(&tx_id, Some(&client), &product, 8.0, 15.0)
            .unwrap();

        assert_eq!(ledger.product(&product).unwrap().current_stock, 12.0);
        let tx = ledger.transaction(&tx_id).unwrap();
        assert_eq!(tx.quantity, 8.0);
        assert_eq!(tx.total, 120.0);
        assert_eq!(tx.profit, Some(40.0)); // recomputed from current avg (10)
        assert_eq!(tx.bill_number.as_deref(), Some("INV-1001")); // never reassigned

        // The stock change is audit-logged.
        let log = &ledger.inventory_logs[0];
        assert_eq!(log.kind, LogKind::Manual);
        assert_eq!(log.change, -3.0);
    }

    #[test]
    fn test_edit_purchase_transaction_reapplies_stock() {
        let (mut ledger, product, _) = stocked_ledger();
        let tx_id = ledger.transactions[0].id.clone(); // the 20 @ 10 purchase

        // Shrinking the purchase from 20 to 12 removes 8 units.
        ledger
            .edit_transaction(&tx_id, None, &product, 12.0, 10.0)
            .unwrap();

        assert_eq!(ledger.product(&product).unwrap().current_stock, 12.0);
        assert_eq!(ledger.transaction(&tx_id).unwrap().total, 120.0);
    }

    #[test]
    fn test_edit_transaction_rejects_negative_stock() {
        let (mut ledger, product, client) = stocked_ledger();
        ledger.dispatch(&client, &product, 5.0, 15.0, 1).unwrap();
        let tx_id = ledger.transactions[0].id.clone();

        // Stock is 15; growing the dispatch by 16 would go below zero.
        let result = ledger.edit_transaction(&tx_id, Some(&client), &product, 21.0, 15.0);
        assert!(matches!(result, Err(LedgerError::InsufficientStock { .. })));

        assert_eq!(ledger.product(&product).unwrap().current_stock, 15.0);
        assert_eq!(ledger.transaction(&tx_id).unwrap().quantity, 5.0);
    }

    #[test]
    fn test_bill_numbers_immune_to_unrelated_edits() {
        let (mut ledger, product, client) = stocked_ledger();
        ledger.dispatch(&client, &product, 2.0, 15.0, 1).unwrap();
        let first_id = ledger.transactions[0].id.clone();

        // Edit the first dispatch between two later dispatches.
        ledger
            .edit_transaction(&first_id, Some(&client), &product, 3.0, 15.0)
            .unwrap();
        let b = ledger.dispatch(&client, &product, 2.0, 15.0, 2).unwrap();
        ledger
            .edit_transaction(&first_id, Some(&client), &product, 1.0, 15.0)
            .unwrap();
        let c = ledger.dispatch(&client, &product, 2.0, 15.0, 3).unwrap();

        assert_eq!(b.bill_number, "INV-1002");
        assert_eq!(c.bill_number, "INV-1003");
        assert_eq!(
            ledger.transaction(&first_id).unwrap().bill_number.as_deref(),
            Some("INV-1001")
        );
    }

    #[test]
    fn test_adjust_stock() {
        let (mut ledger, product, _) = stocked_ledger();

        ledger
            .adjust_stock(&product, -4.0, "Damaged in transit")
            .unwrap();
        assert_eq!(ledger.product(&product).unwrap().current_stock, 16.0);

        let log = &ledger.inventory_logs[0];
        assert_eq!(log.kind, LogKind::Manual);
        assert_eq!(log.change, -4.0);
        assert_eq!(log.reason, "Damaged in transit");
    }

    #[test]
    fn test_adjust_stock_rejects_below_zero() {
        let (mut ledger, product, _) = stocked_ledger();
        let logs_before = ledger.inventory_logs.len();

        let result = ledger.adjust_stock(&product, -25.0, "Stocktake write-off");
        assert!(matches!(result, Err(LedgerError::InsufficientStock { .. })));

        assert_eq!(ledger.product(&product).unwrap().current_stock, 20.0);
        assert_eq!(ledger.inventory_logs.len(), logs_before);
    }

    #[test]
    fn test_adjust_stock_requires_reason() {
        let (mut ledger, product, _) = stocked_ledger();
        assert!(matches!(
            ledger.adjust_stock(&product, 1.0, "   "),
            Err(LedgerError::Validation(_))
        ));
    }

    #[test]
    fn test_audit_log_completeness() {
        // Every stock-affecting operation appends exactly one log whose
        // change equals the applied delta.
        let mut ledger = Ledger::default();
        let product = ledger
            .register_product("Rice", Unit::Kg, 10.0, 5.0, 9.0)
            .unwrap();
        let client = ledger.register_client("C", "", "").unwrap();

        ledger.record_purchase(&product, 5.0, 5.0).unwrap();
        ledger.dispatch(&client, &product, 3.0, 9.0, 1).unwrap();
        ledger.adjust_stock(&product, -2.0, "Spillage").unwrap();
        ledger
            .edit_product(&product, "Rice", Unit::Kg, 11.0, 5.0, 9.0)
            .unwrap();

        // Registration(+10), purchase(+5), dispatch(−3), manual(−2), edit(+1)
        let changes: Vec<f64> = ledger.inventory_logs.iter().rev().map(|l| l.change).collect();
        assert_eq!(changes, vec![10.0, 5.0, -3.0, -2.0, 1.0]);

        let net: f64 = changes.iter().sum();
        assert_eq!(ledger.product(&product).unwrap().current_stock, net);
    }

    #[test]
    fn test_logs_are_newest_first() {
        let (mut ledger, product, _) = stocked_ledger();
        ledger.adjust_stock(&product, 1.0, "Recount").unwrap();

        assert_eq!(ledger.inventory_logs[0].reason, "Recount");
        assert_eq!(ledger.inventory_logs[0].change, 1.0);
    }
}
