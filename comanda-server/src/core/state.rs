//! Server state

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;

/// Shared server state handed to every handler
///
/// Holds the configuration and the embedded database handle. Cloning is
/// cheap: the database handle is internally reference-counted, so each
/// handler gets a shallow copy.
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Config | configuration (immutable) |
/// | db | Surreal<Db> | embedded database |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
}

impl ServerState {
    /// Assemble state from already-initialized parts
    ///
    /// Used by tests that open their own database; production code goes
    /// through [`ServerState::initialize`].
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        Self { config, db }
    }

    /// Create the working directory, open the database, apply schema and
    /// seed reference data on first run
    pub async fn initialize(config: &Config) -> Result<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| ServerError::Config(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("comanda.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        db_service
            .seed_reference_data()
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        Ok(Self::new(config.clone(), db_service.db))
    }

    /// Get a clone of the database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
