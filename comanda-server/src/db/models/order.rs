//! Order Models
//!
//! The order row plus the read views the API serves. Joined views carry
//! the waiter name and table number the way the ticket UI displays them.

use super::LineView;
use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::OrderState;
use surrealdb::RecordId;

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Serving employee
    #[serde(with = "serde_helpers::record_id")]
    pub employee: RecordId,
    /// Table the order belongs to
    #[serde(with = "serde_helpers::record_id")]
    pub dining_table: RecordId,
    pub state: OrderState,
    /// Grand total in whole money units; 0 until billed
    pub total: i64,
    /// Unix millis
    pub created_at: i64,
    /// Refreshed on line delivery and on billing
    pub updated_at: i64,
}

/// Create order payload
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreate {
    pub employee_id: String,
    pub table_id: String,
}

/// Response for order creation
#[derive(Debug, Serialize)]
pub struct OrderCreated {
    pub order_id: String,
}

/// Set order state payload
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStateUpdate {
    pub state: OrderState,
}

/// Order list row with joined reference names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: String,
    pub waiter_name: String,
    pub table_number: i32,
    pub state: OrderState,
    pub created_at: i64,
}

/// Payable worklist row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayableOrder {
    pub order_id: String,
    pub waiter_name: String,
    pub table_number: i32,
    pub state: OrderState,
}

/// One order with its lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order_id: String,
    pub waiter_name: String,
    pub table_number: i32,
    pub state: OrderState,
    pub total: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub lines: Vec<LineView>,
}
