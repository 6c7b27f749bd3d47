//! Menu API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::MenuItem;
use crate::db::repository::MenuItemRepository;
use crate::utils::AppResult;

/// GET /api/menu - enabled menu items, the only ones orderable
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let items = repo.find_enabled().await?;
    Ok(Json(items))
}
