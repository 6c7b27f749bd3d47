//! Dining Table API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::DiningTable;
use crate::db::repository::DiningTableRepository;
use crate::utils::AppResult;

/// GET /api/tables - all dining tables
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let tables = repo.find_all().await?;
    Ok(Json(tables))
}
