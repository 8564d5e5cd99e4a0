//! The fixed demonstration sequence.
//!
//! Log in, then products, orders and statistics, each report skipped when
//! its fetch failed or came back empty. Mutations run only when the config
//! asks for them.

use std::io::{self, Write};

use phonespot_core::{
    export_products_csv, render_order_report, render_product_report, render_statistics,
    summarize_orders, summarize_products, ShopApi, Transport,
};

use crate::config::Config;

const RULE: &str = "============================================================";

/// Where the sequence stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoOutcome {
    LoginFailed,
    Completed,
}

/// Run the demonstration against `api`, writing the reports to `out`.
///
/// Client failures are already logged by `ShopApi`; here they only decide
/// which reports get skipped. The `Err` arm is reserved for `out` failing.
pub fn run<T: Transport, W: Write>(
    api: &mut ShopApi<T>,
    config: &Config,
    out: &mut W,
) -> io::Result<DemoOutcome> {
    writeln!(out, "PhoneSpot E-Commerce admin report")?;
    writeln!(out, "{RULE}")?;

    writeln!(out, "\n1. Logging in as administrator...")?;
    match api.login(&config.admin_email, &config.admin_password) {
        Ok(login) => writeln!(
            out,
            "Logged in as: {}",
            login.display_name().unwrap_or(&config.admin_email)
        )?,
        Err(_) => {
            writeln!(out, "Could not log in. Check the credentials.")?;
            return Ok(DemoOutcome::LoginFailed);
        }
    }

    writeln!(out, "\n2. Fetching products...")?;
    let products = api.list_products(None).unwrap_or_default();
    writeln!(out, "Products fetched: {}", products.len())?;
    if !products.is_empty() {
        write!(out, "{}", render_product_report(&summarize_products(&products)))?;
    }
    if let Some(path) = &config.export_csv {
        if let Ok(rows) = export_products_csv(&products, path) {
            writeln!(out, "\nExported {rows} products to {}", path.display())?;
        }
    }

    writeln!(out, "\n3. Fetching orders...")?;
    let orders = api.list_orders(None).unwrap_or_default();
    writeln!(out, "Orders fetched: {}", orders.len())?;
    if !orders.is_empty() {
        write!(out, "{}", render_order_report(&summarize_orders(&orders)))?;
    }

    writeln!(out, "\n4. Fetching statistics...")?;
    if let Ok(stats) = api.get_statistics() {
        write!(out, "{}", render_statistics(&stats))?;
    }

    if let Some(change) = &config.update_stock {
        writeln!(out, "\n5. Updating stock...")?;
        if api.update_stock(&change.product_id, change.stock).is_ok() {
            writeln!(out, "Stock updated: {} -> {}", change.product_id, change.stock)?;
        }
    }

    if let Some(change) = &config.set_order_status {
        writeln!(out, "\n6. Updating order status...")?;
        if api.update_order_status(&change.order_id, &change.status).is_ok() {
            writeln!(out, "Status updated: {} -> {}", change.order_id, change.status)?;
        }
    }

    writeln!(out, "\n{RULE}")?;
    writeln!(out, "Done")?;
    writeln!(out, "{RULE}")?;
    Ok(DemoOutcome::Completed)
}
