//! Invoice money calculation using rust_decimal for precision
//!
//! All arithmetic runs on `Decimal`, then lands in integer money units.
//! A line's subtotal is quantity × unit price **truncated** toward zero,
//! and the grand total is the sum of the already-truncated subtotals —
//! the rounding behaviour the billing records have always used, kept
//! bit-for-bit so historic and new totals agree.

#[cfg(test)]
mod tests;

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::db::models::{BillableLine, SaleItemDraft};

/// Convert an f64 price to Decimal
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Subtotal for one line: trunc(quantity × unit_price), e.g. 3 × 2.33 → 6
pub fn line_subtotal(quantity: i64, unit_price: f64) -> i64 {
    let subtotal = Decimal::from(quantity) * to_decimal(unit_price);
    subtotal.trunc().to_i64().unwrap_or(0)
}

/// A billable line with its computed subtotal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricedLine {
    pub line_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub subtotal: i64,
}

/// Computed invoice for an order, served as the preview and used as the
/// input to invoice persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoicePreview {
    pub order_id: String,
    pub lines: Vec<PricedLine>,
    pub total: i64,
}

/// Price every billable line and sum the grand total
pub fn compute_invoice(order_id: &str, lines: &[BillableLine]) -> InvoicePreview {
    let lines: Vec<PricedLine> = lines
        .iter()
        .map(|line| PricedLine {
            line_id: line.line_id.clone(),
            product_name: line.product_name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            subtotal: line_subtotal(line.quantity, line.unit_price),
        })
        .collect();
    let total = lines.iter().map(|l| l.subtotal).sum();

    InvoicePreview {
        order_id: order_id.to_string(),
        lines,
        total,
    }
}

impl InvoicePreview {
    /// Rows bound into the sale-persistence transaction
    pub fn to_drafts(&self) -> Vec<SaleItemDraft> {
        self.lines
            .iter()
            .map(|line| SaleItemDraft {
                product_name: line.product_name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                subtotal: line.subtotal,
            })
            .collect()
    }
}
