//! Blocking client core for the PhoneSpot shop backend.
//!
//! # Overview
//! Logs in as an administrator, lists products and orders, fetches sales
//! statistics and updates stock or order state, then turns the fetched
//! records into console reports or a CSV snapshot.
//!
//! # Design
//! - `ShopClient` is sans-IO: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`. It also holds the session token.
//! - `Transport` is the I/O seam; `UreqTransport` is the blocking default.
//! - `ShopApi` pairs the two and logs every failure before returning it.
//! - Products and orders are schema-free JSON objects (`Record`); the
//!   reports and the exporter read them by field name.

pub mod api;
pub mod client;
pub mod error;
pub mod export;
pub mod http;
pub mod report;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_log;

pub use api::ShopApi;
pub use client::ShopClient;
pub use error::ApiError;
pub use export::{export_products_csv, write_products_csv, ExportError, DEFAULT_EXPORT_FILE};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use report::{
    format_usd, render_order_report, render_product_report, render_statistics, summarize_orders,
    summarize_products, CategorySummary, StatusSummary,
};
pub use transport::{Transport, UreqTransport};
pub use types::{LoginRequest, LoginResponse, OrderStatus, Record, Statistics, StatusUpdate, StockUpdate};
