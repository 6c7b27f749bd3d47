//! Sale Models
//!
//! The billing record finalizing an order. Written exactly once, in one
//! transaction, and immutable thereafter.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Sale entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Billed order
    #[serde(with = "serde_helpers::record_id")]
    pub order_ref: RecordId,
    /// Grand total in whole money units
    pub total: i64,
    /// Unix millis
    pub created_at: i64,
}

/// One billed line inside a sale, with a snapshot of the product name
/// and price at billing time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub sale: RecordId,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub subtotal: i64,
}

/// Sale item draft bound into the invoice transaction
#[derive(Debug, Clone, Serialize)]
pub struct SaleItemDraft {
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub subtotal: i64,
}

/// Persisted sale with its items, as served by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDetail {
    pub sale_id: String,
    pub order_id: String,
    pub total: i64,
    pub created_at: i64,
    pub items: Vec<SaleItemRow>,
}

/// Item row inside [`SaleDetail`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItemRow {
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub subtotal: i64,
}

/// Response for invoice creation
#[derive(Debug, Serialize)]
pub struct InvoiceCreated {
    pub invoice_id: String,
    pub total: i64,
}

/// Create invoice payload
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceCreate {
    pub order_id: String,
}
