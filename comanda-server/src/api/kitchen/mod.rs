//! Kitchen API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Kitchen router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/kitchen/queue", get(handler::queue))
}
