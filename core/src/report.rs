//! Console summaries of products, orders and sales statistics.
//!
//! Grouping keeps first-seen order. Field lookups accept the backend's
//! Spanish names first and their English equivalents second, and anything
//! non-numeric in a numeric field counts as zero.

use serde_json::Value;

use crate::types::{Record, Statistics};

const RULE_WIDTH: usize = 60;
const UNCATEGORIZED: &str = "uncategorized";
const UNKNOWN_STATUS: &str = "unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category: String,
    pub count: usize,
    pub stock: f64,
    pub inventory_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusSummary {
    pub status: String,
    pub count: usize,
    pub total: f64,
}

/// Group products by category and total their stock and inventory value.
pub fn summarize_products(products: &[Record]) -> Vec<CategorySummary> {
    let mut groups: Vec<CategorySummary> = Vec::new();
    for product in products {
        let category = label(product, &["categoria", "category"]).unwrap_or_else(|| UNCATEGORIZED.to_string());
        let stock = number(product, &["stock"]);
        let price = number(product, &["precio", "price"]);

        let idx = match groups.iter().position(|g| g.category == category) {
            Some(idx) => idx,
            None => {
                groups.push(CategorySummary {
                    category,
                    count: 0,
                    stock: 0.0,
                    inventory_value: 0.0,
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[idx];
        group.count += 1;
        group.stock += stock;
        group.inventory_value += price * stock;
    }
    groups
}

/// Group orders by status and total their amounts.
pub fn summarize_orders(orders: &[Record]) -> Vec<StatusSummary> {
    let mut groups: Vec<StatusSummary> = Vec::new();
    for order in orders {
        let status = label(order, &["estado", "status"]).unwrap_or_else(|| UNKNOWN_STATUS.to_string());
        let total = number(order, &["total"]);

        match groups.iter_mut().find(|g| g.status == status) {
            Some(group) => {
                group.count += 1;
                group.total += total;
            }
            None => groups.push(StatusSummary {
                status,
                count: 1,
                total,
            }),
        }
    }
    groups
}

pub fn render_product_report(summaries: &[CategorySummary]) -> String {
    let mut out = heading("PRODUCT REPORT");
    for s in summaries {
        out.push_str(&format!(
            "\n{}: {} products\n   Total stock: {} units\n   Inventory value: {}\n",
            s.category,
            s.count,
            format_quantity(s.stock),
            format_usd(s.inventory_value),
        ));
    }
    out
}

pub fn render_order_report(summaries: &[StatusSummary]) -> String {
    let mut out = heading("ORDER REPORT");
    for s in summaries {
        out.push_str(&format!(
            "\n{}: {} orders\n   Total: {}\n",
            s.status.to_uppercase(),
            s.count,
            format_usd(s.total),
        ));
    }
    out
}

pub fn render_statistics(stats: &Statistics) -> String {
    format!(
        "Statistics:\n   Total orders: {}\n   Pending: {}\n   Delivered: {}\n   Total sales: {}\n   Monthly sales: {}\n",
        stats.total_orders,
        stats.pending_orders,
        stats.delivered_orders,
        format_usd(stats.total_sales),
        format_usd(stats.monthly_sales),
    )
}

/// `USD $1,234.56`
pub fn format_usd(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("USD {sign}${grouped}.{frac_part}")
}

fn heading(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("\n{rule}\n{title}\n{rule}\n")
}

fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// First present, non-null value among `keys`, as a display label.
fn label(record: &Record, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| record.get(*k))
        .find(|v| !v.is_null())
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

fn number(record: &Record, keys: &[&str]) -> f64 {
    keys.iter()
        .filter_map(|k| record.get(*k))
        .find_map(Value::as_f64)
        .unwrap_or(0.0)
}
