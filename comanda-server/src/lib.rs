//! Comanda Server - order lifecycle engine for table service
//!
//! # Architecture
//!
//! Orders and their line items move through kitchen states until every
//! line is delivered or cancelled; the order then enters the payable
//! worklist and can be invoiced exactly once. The crate provides:
//!
//! - **HTTP API** (`api`): RESTful routes per resource
//! - **Database** (`db`): embedded SurrealDB storage and repositories
//! - **Billing** (`billing`): invoice math with exact decimal arithmetic
//!
//! # Module structure
//!
//! ```text
//! comanda-server/src/
//! ├── core/          # configuration, state, server, errors
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # database layer (models, repositories)
//! ├── billing/       # invoice computation
//! └── utils/         # errors, logging, validation, time
//! ```
//!
//! The pure lifecycle rules (state catalog, billing eligibility) live in
//! the `shared` crate so they stay testable without a store.

pub mod api;
pub mod billing;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use db::DbService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Prepare the process environment: .env file and logging
pub fn setup_environment() {
    dotenv::dotenv().ok();
    init_logger();
}
