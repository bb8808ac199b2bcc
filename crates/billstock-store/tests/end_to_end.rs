//! End-to-end trading scenario through the shared state handle:
//! register → purchase → dispatch → client sales, with the blob
//! persisted at every step and the invoice snapshot captured by a
//! listener.

use std::sync::{Arc, Mutex};

use billstock_core::{DispatchListener, InvoiceData, LedgerError, TransactionKind, Unit};
use billstock_store::{BlobStore, CommitError, LedgerState};

struct CapturingListener(Arc<Mutex<Vec<InvoiceData>>>);

impl DispatchListener for CapturingListener {
    fn on_dispatch(&self, invoice: &InvoiceData) {
        self.0.lock().unwrap().push(invoice.clone());
    }
}

#[test]
fn full_trading_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let invoices = Arc::new(Mutex::new(Vec::new()));
    let state = LedgerState::open(BlobStore::new(dir.path()))
        .unwrap()
        .with_listener(Box::new(CapturingListener(invoices.clone())));

    // Register product P (stock 0, cost 10, sale 15).
    let product = state
        .commit(|l| l.register_product("Basmati Rice", Unit::Kg, 0.0, 10.0, 15.0))
        .unwrap();

    // Purchase 20 units @ 10: average stays 10, stock becomes 20.
    state.commit(|l| l.record_purchase(&product, 20.0, 10.0)).unwrap();
    state.with_ledger(|l| {
        let p = l.product(&product).unwrap();
        assert_eq!(p.avg_purchase_rate, 10.0);
        assert_eq!(p.current_stock, 20.0);
    });

    // Register client C.
    let client = state
        .commit(|l| l.register_client("Sharma Traders", "98765", "Pune"))
        .unwrap();

    // Dispatch 5 units @ 15: stock 15, profit 25, bill INV-1001.
    let invoice = state.dispatch(&client, &product, 5.0, 15.0, 1_700_000_000_000).unwrap();
    assert_eq!(invoice.bill_number, "INV-1001");
    assert_eq!(invoice.product.total, 75.0);

    state.with_ledger(|l| {
        assert_eq!(l.product(&product).unwrap().current_stock, 15.0);
        let dispatch = l
            .transactions
            .iter()
            .find(|t| t.kind == TransactionKind::Dispatch)
            .unwrap();
        assert_eq!(dispatch.profit, Some(25.0));
    });

    // Client sells 3 of the 5 they hold: balance drops to 2.
    state
        .commit(|l| l.report_client_sale(&client, &product, 3.0, 18.0))
        .unwrap();
    state.with_ledger(|l| {
        assert_eq!(l.client_stock_balance(&client, &product), 2.0);
    });

    // Selling 3 more would drive the balance negative: rejected.
    let result = state.commit(|l| l.report_client_sale(&client, &product, 3.0, 18.0));
    assert!(matches!(
        result,
        Err(CommitError::Ledger(LedgerError::InsufficientClientStock { .. }))
    ));

    // The listener saw exactly the one committed dispatch.
    assert_eq!(invoices.lock().unwrap().len(), 1);

    // Everything above survived the blob: reopen cold and re-check.
    let reopened = LedgerState::open(BlobStore::new(dir.path())).unwrap();
    reopened.with_ledger(|l| {
        assert_eq!(l.product(&product).unwrap().current_stock, 15.0);
        assert_eq!(l.client_stock_balance(&client, &product), 2.0);
        assert_eq!(l.settings.next_bill_no, 1002);
        assert_eq!(l.transactions.len(), 3); // purchase, dispatch, client sale

        let totals = l.dashboard_totals();
        assert_eq!(totals.gross_sales, 75.0);
        assert_eq!(totals.net_profit, 25.0);
        assert_eq!(totals.market_reach, 54.0);
        assert_eq!(totals.asset_spend, 200.0);
    });
}
