//! Line Item Models

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::OrderState;
use surrealdb::RecordId;

/// Annotation stored when the waiter leaves the field empty
pub const DEFAULT_ANNOTATION: &str = "Sin observaciones";

/// Line item entity
///
/// One menu item within an order, with its own quantity and state.
/// Frozen once the owning order is billed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Owning order
    #[serde(with = "serde_helpers::record_id")]
    pub order_ref: RecordId,
    /// Ordered menu item (lookup only, not owned)
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    pub quantity: i64,
    pub annotation: String,
    pub state: OrderState,
}

/// Add line item payload
#[derive(Debug, Clone, Deserialize)]
pub struct LineItemCreate {
    pub menu_item_id: String,
    pub quantity: i64,
    pub annotation: Option<String>,
}

/// Update line item payload (quantity/annotation edits and state moves)
#[derive(Debug, Clone, Deserialize)]
pub struct LineItemUpdate {
    pub quantity: Option<i64>,
    pub annotation: Option<String>,
    pub state: Option<OrderState>,
}

/// Line row within an order view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineView {
    pub line_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub annotation: String,
    pub state: OrderState,
}

/// Kitchen queue row: an active line with the table it is destined for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenLine {
    pub line_id: String,
    pub order_id: String,
    pub table_number: i32,
    pub product_name: String,
    pub quantity: i64,
    pub annotation: String,
    pub state: OrderState,
}

/// Billable projection of a line: quantity joined with the menu price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillableLine {
    pub line_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub state: OrderState,
}
