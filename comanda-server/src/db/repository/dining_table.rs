//! Dining Table Repository

use super::{BaseRepository, RepoResult, parse_ref};
use crate::db::models::DiningTable;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all dining tables
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table ORDER BY number")
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let thing = parse_ref(id, TABLE)?;
        let table: Option<DiningTable> = self.base.db().select(thing).await?;
        Ok(table)
    }
}
