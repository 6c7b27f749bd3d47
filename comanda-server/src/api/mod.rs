//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`orders`] - order lifecycle and line items
//! - [`invoices`] - invoice persistence and retrieval
//! - [`kitchen`] - kitchen queue
//! - [`menu`] - menu reference data
//! - [`tables`] - dining table reference data
//! - [`employees`] - employee reference data

pub mod employees;
pub mod health;
pub mod invoices;
pub mod kitchen;
pub mod menu;
pub mod orders;
pub mod tables;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(invoices::router())
        .merge(kitchen::router())
        .merge(menu::router())
        .merge(tables::router())
        .merge(employees::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
