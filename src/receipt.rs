//! Receipt document generation for completed orders.
//!
//! The filename is derived from the order id, so regenerating a receipt for
//! the same order overwrites the previous artifact.
use crate::schema::CartEntry;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};

pub fn receipt_path(dir: &Path, order_id: u32) -> PathBuf {
    dir.join(format!("Order_{order_id}_Receipt.txt"))
}

/// Render and write the itemized receipt, returning its path.
pub fn generate(
    dir: &Path,
    order_id: u32,
    customer: &str,
    placed_at: &str,
    entries: &[CartEntry],
    total: Decimal,
    currency: &str,
) -> Result<PathBuf> {
    let path = receipt_path(dir, order_id);
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let document = render(order_id, customer, placed_at, entries, total, currency);
    fs::write(&path, document).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

fn render(
    order_id: u32,
    customer: &str,
    placed_at: &str,
    entries: &[CartEntry],
    total: Decimal,
    currency: &str,
) -> String {
    let mut out = String::new();
    out.push_str("========================================\n");
    out.push_str("            ORDER RECEIPT\n");
    out.push_str("========================================\n");
    out.push_str(&format!("Order ID: {order_id}\n"));
    out.push_str(&format!("Customer: {customer}\n"));
    out.push_str(&format!("Date: {placed_at}\n"));
    out.push_str("Items:\n");
    for entry in entries {
        out.push_str(&format!(
            "  {} x {} = {currency}{:.2}\n",
            entry.name,
            entry.qty,
            entry.amount()
        ));
    }
    out.push_str("----------------------------------------\n");
    out.push_str(&format!("TOTAL: {currency}{total:.2}\n"));
    out
}
