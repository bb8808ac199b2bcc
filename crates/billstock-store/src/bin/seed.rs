//! # Seed Data Generator
//!
//! Populates a blob with demo books for development.
//!
//! ## Usage
//! ```bash
//! # Seed into ./data/billstock_data.json (default)
//! cargo run -p billstock-store --bin seed
//!
//! # Seed into another directory
//! cargo run -p billstock-store --bin seed -- --dir ./demo-data
//! ```
//!
//! ## Generated Books
//! A small trading year: a handful of commodity products with opening
//! stock, three clients, restocking purchases, billed dispatches, and a
//! few reported client sales — enough for every dashboard figure and
//! audit view to show something real.

use std::env;
use std::process::ExitCode;

use tracing::{error, info};

use billstock_core::Unit;
use billstock_store::{BlobStore, CommitError, LedgerState};

/// Demo catalog: name, unit, opening stock, purchase rate, sale rate.
const PRODUCTS: &[(&str, Unit, f64, f64, f64)] = &[
    ("Basmati Rice", Unit::Kg, 500.0, 62.0, 78.0),
    ("Whole Wheat Atta", Unit::Bags, 120.0, 310.0, 365.0),
    ("Sunflower Oil", Unit::Liters, 200.0, 118.0, 139.0),
    ("Masala Tea Packs", Unit::Units, 0.0, 85.0, 110.0),
];

/// Demo clients: name, phone, address.
const CLIENTS: &[(&str, &str, &str)] = &[
    ("Sharma Traders", "98200 11223", "14 Market Road, Pune"),
    ("Patel & Sons", "98450 44556", "2 Mill Street, Nashik"),
    ("Lakshmi Stores", "99870 77889", "Bazaar Lane, Kolhapur"),
];

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let dir = parse_dir_arg().unwrap_or_else(|| "./data".to_string());

    match seed(&dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Seeding failed");
            ExitCode::FAILURE
        }
    }
}

/// Reads `--dir <path>` from the command line, if present.
fn parse_dir_arg() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--dir")
        .and_then(|i| args.get(i + 1).cloned())
}

fn seed(dir: &str) -> Result<(), CommitError> {
    let state = LedgerState::open(BlobStore::new(dir))?;

    state.commit(|l| {
        l.settings.company_name = "NexGen Solutions".to_string();
        Ok(())
    })?;

    let mut product_ids = Vec::new();
    for (name, unit, stock, purchase_rate, sale_rate) in PRODUCTS {
        let id = state
            .commit(|l| l.register_product(name, *unit, *stock, *purchase_rate, *sale_rate))?;
        product_ids.push(id);
    }

    let mut client_ids = Vec::new();
    for (name, phone, address) in CLIENTS {
        let id = state.commit(|l| l.register_client(name, phone, address))?;
        client_ids.push(id);
    }

    // A restock at a higher rate so the weighted average visibly moves.
    state.commit(|l| l.record_purchase(&product_ids[0], 200.0, 68.0))?;
    state.commit(|l| l.record_purchase(&product_ids[2], 100.0, 122.0))?;

    // Billed dispatches and what the clients sold onward.
    let now = billstock_core::now_millis();
    state.dispatch(&client_ids[0], &product_ids[0], 150.0, 78.0, now)?;
    state.dispatch(&client_ids[1], &product_ids[1], 40.0, 360.0, now)?;
    state.dispatch(&client_ids[0], &product_ids[2], 60.0, 139.0, now)?;
    state.dispatch(&client_ids[2], &product_ids[0], 80.0, 76.0, now)?;

    state.commit(|l| l.report_client_sale(&client_ids[0], &product_ids[0], 90.0, 86.0))?;
    state.commit(|l| l.report_client_sale(&client_ids[1], &product_ids[1], 25.0, 395.0))?;

    // A stocktake correction so the audit log has a manual entry.
    state.commit(|l| l.adjust_stock(&product_ids[2], -3.0, "Leaked cans written off"))?;

    let totals = state.with_ledger(|l| l.dashboard_totals());
    info!(
        gross_sales = totals.gross_sales,
        net_profit = totals.net_profit,
        market_reach = totals.market_reach,
        asset_spend = totals.asset_spend,
        "Demo books seeded"
    );
    info!(dir = %dir, "Blob written");

    Ok(())
}
