//! Employee API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Employee router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/employees/waiters", get(handler::waiters))
}
