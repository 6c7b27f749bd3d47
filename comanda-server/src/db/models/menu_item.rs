//! Menu Item Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Menu item entity
///
/// Read-only reference data for the lifecycle core; only enabled items
/// are offered for ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit price
    pub price: f64,
    #[serde(default = "default_true")]
    pub is_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

fn default_true() -> bool {
    true
}
