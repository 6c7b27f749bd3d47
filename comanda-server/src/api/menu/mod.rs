//! Menu API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Menu router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/menu", get(handler::list))
}
