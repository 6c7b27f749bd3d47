//! Menu Item Repository
//!
//! Read-only lookups; the lifecycle core never mutates the menu.

use super::{BaseRepository, RepoResult, parse_ref};
use crate::db::models::MenuItem;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all enabled menu items, the only ones offered for ordering
    pub async fn find_enabled(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE is_enabled = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let thing = parse_ref(id, TABLE)?;
        let item: Option<MenuItem> = self.base.db().select(thing).await?;
        Ok(item)
    }
}
