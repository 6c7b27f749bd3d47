//! Health check route
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /api/health | GET | liveness + database reachability |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Status (ok | degraded)
    status: &'static str,
    /// Crate version
    version: &'static str,
    /// Whether the database answered a probe query
    database: bool,
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    // Probe the store with a trivial query; degraded beats dead
    let database = state.db.query("RETURN 1").await.is_ok();

    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}
