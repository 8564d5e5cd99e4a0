//! Command-line and environment configuration.
//!
//! Every setting has an environment fallback and a default, so running the
//! binary bare performs the standard demonstration against a local backend.

use std::path::PathBuf;

use clap::Parser;
use phonespot_core::DEFAULT_EXPORT_FILE;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@phonespot.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// PhoneSpot admin report: log in, summarize products and orders, print
/// sales statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "phonespot-report")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Base URL of the shop API
    #[arg(long, env = "BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Administrator login
    #[arg(long, env = "ADMIN_EMAIL", default_value = DEFAULT_ADMIN_EMAIL)]
    pub admin_email: String,

    /// Administrator password
    #[arg(long, env = "ADMIN_PASSWORD", default_value = DEFAULT_ADMIN_PASSWORD, hide_env_values = true, hide_default_value = true)]
    pub admin_password: String,

    /// Log filter (trace, debug, info, warn, error or a full EnvFilter directive)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Write the fetched products to a CSV file
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = DEFAULT_EXPORT_FILE)]
    pub export_csv: Option<PathBuf>,

    /// Set a product's stock after the reports, e.g. `prod-1=15`
    #[arg(long, value_name = "ID=STOCK", value_parser = parse_stock_change)]
    pub update_stock: Option<StockChange>,

    /// Set an order's status after the reports, e.g. `665f...=procesando`
    #[arg(long, value_name = "ID=STATUS", value_parser = parse_status_change)]
    pub set_order_status: Option<StatusChange>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockChange {
    pub product_id: String,
    pub stock: i64,
}

/// The status is kept as given; the client validates it before sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub order_id: String,
    pub status: String,
}

fn split_assignment(s: &str) -> Result<(&str, &str), String> {
    match s.split_once('=') {
        Some((id, value)) if !id.is_empty() && !value.is_empty() => Ok((id, value)),
        _ => Err(format!("expected ID=VALUE, got '{s}'")),
    }
}

fn parse_stock_change(s: &str) -> Result<StockChange, String> {
    let (id, value) = split_assignment(s)?;
    let stock = value
        .parse()
        .map_err(|e| format!("invalid stock '{value}': {e}"))?;
    Ok(StockChange {
        product_id: id.to_string(),
        stock,
    })
}

fn parse_status_change(s: &str) -> Result<StatusChange, String> {
    let (id, value) = split_assignment(s)?;
    Ok(StatusChange {
        order_id: id.to_string(),
        status: value.to_string(),
    })
}
