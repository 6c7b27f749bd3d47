//! Order API Module
//!
//! Order lifecycle plus the nested line-item routes. The payable
//! worklist and the invoice preview live here because both are read
//! views over an order's lines.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route("/payable", get(handler::payable))
        .route(
            "/{id}",
            get(handler::get_detail)
                .put(handler::set_state)
                .delete(handler::delete),
        )
        .route("/{id}/invoice-preview", get(handler::invoice_preview))
        .route("/{id}/lines", post(handler::add_line))
        .route(
            "/{id}/lines/{line_id}",
            put(handler::update_line).delete(handler::remove_line),
        )
}
