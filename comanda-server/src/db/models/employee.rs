//! Employee Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Waiter role marker stored on employee rows
pub const ROLE_WAITER: &str = "WAITER";

/// Employee entity (reference data)
///
/// Only waiters participate in the ordering flow; other roles exist in
/// the table but are never joined into orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub role: String,
}
