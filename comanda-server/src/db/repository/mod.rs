//! Repository Module
//!
//! Parameterized CRUD over the embedded SurrealDB store. Every mutation
//! that reads state before writing (line edits, state moves, billing,
//! cascade deletes) runs inside a single `BEGIN/COMMIT` transaction and
//! uses `THROW` markers to abort; the markers are translated back into
//! typed errors here.

pub mod dining_table;
pub mod employee;
pub mod line_item;
pub mod menu_item;
pub mod order;
pub mod sale;

// Re-exports
pub use dining_table::DiningTableRepository;
pub use employee::EmployeeRepository;
pub use line_item::LineItemRepository;
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;
pub use sale::SaleRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Abort markers thrown inside lifecycle transactions
pub(crate) mod markers {
    pub const ORDER_NOT_FOUND: &str = "ORDER_NOT_FOUND";
    pub const LINE_NOT_FOUND: &str = "LINE_NOT_FOUND";
    pub const MENU_ITEM_NOT_FOUND: &str = "MENU_ITEM_NOT_FOUND";
    pub const MENU_ITEM_DISABLED: &str = "MENU_ITEM_DISABLED";
    pub const ORDER_BILLED: &str = "ORDER_BILLED";
    pub const ORDER_NOT_BILLABLE: &str = "ORDER_NOT_BILLABLE";
}

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        if msg.contains(markers::ORDER_NOT_FOUND) {
            RepoError::NotFound("Order not found".to_string())
        } else if msg.contains(markers::LINE_NOT_FOUND) {
            RepoError::NotFound("Line item not found".to_string())
        } else if msg.contains(markers::MENU_ITEM_NOT_FOUND) {
            RepoError::NotFound("Menu item not found".to_string())
        } else if msg.contains(markers::MENU_ITEM_DISABLED) {
            RepoError::Validation("Menu item is not enabled for ordering".to_string())
        } else if msg.contains(markers::ORDER_BILLED) {
            RepoError::Conflict("Order is already billed; its line items are frozen".to_string())
        } else if msg.contains(markers::ORDER_NOT_BILLABLE) {
            RepoError::Conflict("Order is not eligible for billing".to_string())
        } else {
            RepoError::Database(msg)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Surface statement errors from a transactional query.
///
/// When a transaction aborts, every statement reports an error; the one
/// carrying the THROW marker is the interesting one, so it wins over the
/// generic cancelled-transaction notices.
pub(crate) fn check_response(mut response: surrealdb::Response) -> RepoResult<()> {
    let errors = response.take_errors();
    if errors.is_empty() {
        return Ok(());
    }
    let mut fallback = RepoError::Database("Unknown database error".to_string());
    for (_, err) in errors {
        let mapped = RepoError::from(err);
        if !matches!(mapped, RepoError::Database(_)) {
            return Err(mapped);
        }
        fallback = mapped;
    }
    Err(fallback)
}

/// Parse a "table:id" reference and check it points at the expected table.
pub(crate) fn parse_ref(id: &str, table: &str) -> RepoResult<RecordId> {
    let rid: RecordId = id
        .parse()
        .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
    if rid.table() != table {
        return Err(RepoError::Validation(format!(
            "Expected a {} ID, got: {}",
            table, id
        )));
    }
    Ok(rid)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
