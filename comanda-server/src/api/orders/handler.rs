//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::OrderState;

use crate::billing;
use crate::core::ServerState;
use crate::db::models::{
    DEFAULT_ANNOTATION, LineItem, LineItemCreate, LineItemUpdate, OrderCreate, OrderCreated,
    OrderDetail, OrderStateUpdate, OrderSummary, PayableOrder,
};
use crate::db::repository::{LineItemRepository, OrderRepository};
use crate::utils::validation::{MAX_ANNOTATION_LEN, validate_optional_text, validate_quantity};
use crate::utils::{AppError, AppResult, time};

/// POST /api/orders - place a new order for a waiter + table
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderCreated>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .create(&payload.employee_id, &payload.table_id, time::now_millis())
        .await?;

    let order_id = order
        .id
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Created order has no id"))?;
    Ok(Json(OrderCreated { order_id }))
}

/// GET /api/orders - all orders with waiter name and table number
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderSummary>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_all().await?;
    Ok(Json(orders))
}

/// GET /api/orders/payable - orders whose every line is delivered or
/// cancelled, with something left to invoice
pub async fn payable(State(state): State<ServerState>) -> AppResult<Json<Vec<PayableOrder>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_payable().await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - one order with its lines
pub async fn get_detail(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderDetail>> {
    let repo = OrderRepository::new(state.db.clone());
    let detail = repo
        .find_detail(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(detail))
}

/// PUT /api/orders/:id - direct state override
///
/// Accepts a state name or a legacy numeric code. BILLED cannot be set
/// here; only invoice creation finalizes an order.
pub async fn set_state(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderStateUpdate>,
) -> AppResult<Json<OrderDetail>> {
    if payload.state == OrderState::Billed {
        return Err(AppError::conflict(
            "Order state BILLED is set by invoicing, not directly",
        ));
    }

    let repo = OrderRepository::new(state.db.clone());
    repo.set_state(&id, payload.state, time::now_millis()).await?;

    let detail = repo
        .find_detail(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(detail))
}

/// DELETE /api/orders/:id - delete the order and every line it owns
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = OrderRepository::new(state.db.clone());
    repo.delete_cascade(&id).await?;
    Ok(Json(true))
}

/// GET /api/orders/:id/invoice-preview - computed subtotals and total,
/// nothing persisted
pub async fn invoice_preview(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<billing::InvoicePreview>> {
    let lines = LineItemRepository::new(state.db.clone())
        .billable_lines(&id)
        .await?;
    if lines.is_empty() {
        return Err(AppError::not_found(format!(
            "Order {} has no billable lines",
            id
        )));
    }
    Ok(Json(billing::compute_invoice(&id, &lines)))
}

/// POST /api/orders/:id/lines - add a line item to an order
pub async fn add_line(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<LineItemCreate>,
) -> AppResult<Json<LineItem>> {
    validate_quantity(payload.quantity)?;
    validate_optional_text(&payload.annotation, "annotation", MAX_ANNOTATION_LEN)?;
    let annotation = payload
        .annotation
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ANNOTATION.to_string());

    let repo = LineItemRepository::new(state.db.clone());
    let line = repo
        .add(&id, &payload.menu_item_id, payload.quantity, annotation)
        .await?;
    Ok(Json(line))
}

/// PUT /api/orders/:id/lines/:line_id - edit quantity/annotation and/or
/// move the line to a new state
pub async fn update_line(
    State(state): State<ServerState>,
    Path((id, line_id)): Path<(String, String)>,
    Json(payload): Json<LineItemUpdate>,
) -> AppResult<Json<LineItem>> {
    if payload.quantity.is_none() && payload.annotation.is_none() && payload.state.is_none() {
        return Err(AppError::validation(
            "Provide at least one of quantity, annotation or state",
        ));
    }
    if let Some(quantity) = payload.quantity {
        validate_quantity(quantity)?;
    }
    validate_optional_text(&payload.annotation, "annotation", MAX_ANNOTATION_LEN)?;
    if payload.state == Some(OrderState::Billed) {
        return Err(AppError::conflict(
            "Line state BILLED is set by invoicing, not directly",
        ));
    }

    let repo = LineItemRepository::new(state.db.clone());
    require_line_in_order(&repo, &id, &line_id).await?;

    if payload.quantity.is_some() || payload.annotation.is_some() {
        repo.update(&line_id, payload.quantity, payload.annotation)
            .await?;
    }
    if let Some(new_state) = payload.state {
        repo.set_state(&line_id, new_state, time::now_millis())
            .await?;
    }

    let line = repo
        .find_by_id(&line_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Line item {} not found", line_id)))?;
    Ok(Json(line))
}

/// DELETE /api/orders/:id/lines/:line_id - remove one line item
pub async fn remove_line(
    State(state): State<ServerState>,
    Path((id, line_id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    let repo = LineItemRepository::new(state.db.clone());
    require_line_in_order(&repo, &id, &line_id).await?;
    repo.remove(&line_id).await?;
    Ok(Json(true))
}

/// Check that a line exists and belongs to the order in the path
async fn require_line_in_order(
    repo: &LineItemRepository,
    order_id: &str,
    line_id: &str,
) -> AppResult<()> {
    let line = repo
        .find_by_id(line_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Line item {} not found", line_id)))?;
    if line.order_ref.to_string() != order_id {
        return Err(AppError::not_found(format!(
            "Line item {} does not belong to order {}",
            line_id, order_id
        )));
    }
    Ok(())
}
