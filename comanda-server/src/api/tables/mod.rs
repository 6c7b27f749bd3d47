//! Dining Table API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Dining table router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/tables", get(handler::list))
}
