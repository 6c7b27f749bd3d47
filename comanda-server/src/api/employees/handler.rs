//! Employee API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::Employee;
use crate::db::repository::EmployeeRepository;
use crate::utils::AppResult;

/// GET /api/employees/waiters - the employees orders can be assigned to
pub async fn waiters(State(state): State<ServerState>) -> AppResult<Json<Vec<Employee>>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let waiters = repo.find_waiters().await?;
    Ok(Json(waiters))
}
