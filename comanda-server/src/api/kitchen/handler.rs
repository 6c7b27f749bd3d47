//! Kitchen API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::KitchenLine;
use crate::db::repository::LineItemRepository;
use crate::utils::AppResult;

/// GET /api/kitchen/queue - every line still in preparation or ready,
/// with the table it is destined for
pub async fn queue(State(state): State<ServerState>) -> AppResult<Json<Vec<KitchenLine>>> {
    let repo = LineItemRepository::new(state.db.clone());
    let lines = repo.kitchen_queue().await?;
    Ok(Json(lines))
}
