//! Invoice API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::order_is_payable;

use crate::billing;
use crate::core::ServerState;
use crate::db::models::{InvoiceCreate, InvoiceCreated, SaleDetail};
use crate::db::repository::{LineItemRepository, OrderRepository, SaleRepository};
use crate::utils::{AppError, AppResult, time};

/// POST /api/invoices - bill an order
///
/// Computes the totals from current line states, then persists the sale,
/// its items, the line freeze and the order finalization in a single
/// transaction. Eligibility is checked twice: here for a clean 409, and
/// again inside the transaction against concurrent state changes.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InvoiceCreate>,
) -> AppResult<Json<InvoiceCreated>> {
    let order_id = payload.order_id;

    let order_repo = OrderRepository::new(state.db.clone());
    let line_repo = LineItemRepository::new(state.db.clone());

    let order = order_repo
        .find_by_id(&order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))?;

    let lines = line_repo.billable_lines(&order_id).await?;
    if lines.is_empty() {
        return Err(AppError::not_found(format!(
            "Order {} has no billable lines",
            order_id
        )));
    }

    let line_states = line_repo.states_for_order(&order_id).await?;
    if !order_is_payable(order.state, &line_states) {
        return Err(AppError::conflict(format!(
            "Order {} is not eligible for billing",
            order_id
        )));
    }

    let invoice = billing::compute_invoice(&order_id, &lines);

    let sale_repo = SaleRepository::new(state.db.clone());
    let sale_id = sale_repo
        .create_invoice(
            &order_id,
            invoice.to_drafts(),
            invoice.total,
            time::now_millis(),
        )
        .await?;

    tracing::info!(order = %order_id, sale = %sale_id, total = invoice.total, "Order billed");

    Ok(Json(InvoiceCreated {
        invoice_id: sale_id.to_string(),
        total: invoice.total,
    }))
}

/// GET /api/invoices/:id - a persisted sale with its items
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<SaleDetail>> {
    let repo = SaleRepository::new(state.db.clone());
    let sale = repo
        .find_detail(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Invoice {} not found", id)))?;
    Ok(Json(sale))
}
