//! Database Module
//!
//! Embedded SurrealDB: connection, schema and reference-data seeding.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "comanda";
const DATABASE: &str = "pos";

// Applied on every startup; IF NOT EXISTS keeps it idempotent.
const SCHEMA: &str = "
    DEFINE TABLE IF NOT EXISTS menu_item SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS name ON menu_item TYPE string;
    DEFINE FIELD IF NOT EXISTS description ON menu_item TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS price ON menu_item TYPE number;
    DEFINE FIELD IF NOT EXISTS is_enabled ON menu_item TYPE bool DEFAULT true;
    DEFINE FIELD IF NOT EXISTS image_url ON menu_item TYPE option<string>;

    DEFINE TABLE IF NOT EXISTS dining_table SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS number ON dining_table TYPE int;
    DEFINE FIELD IF NOT EXISTS seats ON dining_table TYPE int;

    DEFINE TABLE IF NOT EXISTS employee SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS name ON employee TYPE string;
    DEFINE FIELD IF NOT EXISTS role ON employee TYPE string;

    DEFINE TABLE IF NOT EXISTS order SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS employee ON order TYPE record<employee>;
    DEFINE FIELD IF NOT EXISTS dining_table ON order TYPE record<dining_table>;
    DEFINE FIELD IF NOT EXISTS state ON order TYPE string;
    DEFINE FIELD IF NOT EXISTS total ON order TYPE int;
    DEFINE FIELD IF NOT EXISTS created_at ON order TYPE int;
    DEFINE FIELD IF NOT EXISTS updated_at ON order TYPE int;

    DEFINE TABLE IF NOT EXISTS line_item SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS order_ref ON line_item TYPE record<order>;
    DEFINE FIELD IF NOT EXISTS menu_item ON line_item TYPE record<menu_item>;
    DEFINE FIELD IF NOT EXISTS quantity ON line_item TYPE int;
    DEFINE FIELD IF NOT EXISTS annotation ON line_item TYPE string;
    DEFINE FIELD IF NOT EXISTS state ON line_item TYPE string;

    DEFINE TABLE IF NOT EXISTS sale SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS order_ref ON sale TYPE record<order>;
    DEFINE FIELD IF NOT EXISTS total ON sale TYPE int;
    DEFINE FIELD IF NOT EXISTS created_at ON sale TYPE int;

    DEFINE TABLE IF NOT EXISTS sale_item SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS sale ON sale_item TYPE record<sale>;
    DEFINE FIELD IF NOT EXISTS product_name ON sale_item TYPE string;
    DEFINE FIELD IF NOT EXISTS quantity ON sale_item TYPE int;
    DEFINE FIELD IF NOT EXISTS unit_price ON sale_item TYPE number;
    DEFINE FIELD IF NOT EXISTS subtotal ON sale_item TYPE int;
";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        let service = Self::bootstrap(db).await?;
        tracing::info!("Database ready at {db_path} (embedded SurrealDB)");
        Ok(service)
    }

    /// Select namespace/database and apply schema definitions
    async fn bootstrap(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?
            .check()
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
        tracing::info!("Database schema applied");

        Ok(Self { db })
    }

    /// Insert starter reference data (menu, tables, waiters) when the
    /// menu is empty, so a fresh install is usable immediately.
    ///
    /// Returns true when seeding ran.
    pub async fn seed_reference_data(&self) -> Result<bool, AppError> {
        let mut result = self
            .db
            .query("SELECT VALUE count() FROM menu_item GROUP ALL")
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        let counts: Vec<i64> = result
            .take(0)
            .map_err(|e| AppError::database(e.to_string()))?;
        if counts.first().copied().unwrap_or(0) > 0 {
            return Ok(false);
        }

        self.db
            .query(
                "BEGIN TRANSACTION; \
                 CREATE menu_item CONTENT { name: 'Burger', description: 'House burger with fries', price: 10.0, is_enabled: true }; \
                 CREATE menu_item CONTENT { name: 'Caesar Salad', description: 'Romaine, parmesan, croutons', price: 8.5, is_enabled: true }; \
                 CREATE menu_item CONTENT { name: 'Soda', description: 'Soft drink 330ml', price: 3.0, is_enabled: true }; \
                 CREATE menu_item CONTENT { name: 'Espresso', price: 2.33, is_enabled: true }; \
                 CREATE menu_item CONTENT { name: 'Daily Special', price: 12.0, is_enabled: false }; \
                 CREATE dining_table CONTENT { number: 1, seats: 2 }; \
                 CREATE dining_table CONTENT { number: 2, seats: 4 }; \
                 CREATE dining_table CONTENT { number: 3, seats: 4 }; \
                 CREATE dining_table CONTENT { number: 4, seats: 6 }; \
                 CREATE dining_table CONTENT { number: 5, seats: 8 }; \
                 CREATE employee CONTENT { name: 'Ana', role: 'WAITER' }; \
                 CREATE employee CONTENT { name: 'Luis', role: 'WAITER' }; \
                 CREATE employee CONTENT { name: 'Marta', role: 'MANAGER' }; \
                 COMMIT TRANSACTION;",
            )
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .check()
            .map_err(|e| AppError::database(e.to_string()))?;

        tracing::info!("Seeded starter menu, tables and employees");
        Ok(true)
    }
}
