//! CSV snapshot of the product catalogue.
//!
//! Records can be heterogeneous, so the header is the sorted union of every
//! key seen across all records and missing fields render as blank cells.

use std::collections::BTreeSet;
use std::fs::File;
use std::io;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::types::Record;

pub const DEFAULT_EXPORT_FILE: &str = "productos_export.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to export; no file was created.
    #[error("no products to export")]
    Empty,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Write `products` to the file at `path`, replacing it if present.
///
/// Returns the number of data rows written.
pub fn export_products_csv(products: &[Record], path: impl AsRef<Path>) -> Result<usize, ExportError> {
    let path = path.as_ref();
    if products.is_empty() {
        warn!("no products to export");
        return Err(ExportError::Empty);
    }

    let result = File::create(path)
        .map_err(ExportError::from)
        .and_then(|file| write_products_csv(products, file));
    match &result {
        Ok(rows) => info!(path = %path.display(), rows, "products exported"),
        Err(e) => error!(path = %path.display(), error = %e, "export failed"),
    }
    result
}

/// Serialize `products` as CSV into `writer`. Returns the number of data rows.
pub fn write_products_csv<W: io::Write>(products: &[Record], writer: W) -> Result<usize, ExportError> {
    if products.is_empty() {
        return Err(ExportError::Empty);
    }

    let columns: Vec<&str> = products
        .iter()
        .flat_map(|p| p.keys().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(&columns)?;
    for product in products {
        csv.write_record(columns.iter().map(|c| cell(product.get(*c))))?;
    }
    csv.flush()?;
    Ok(products.len())
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
