//! Line Item Repository
//!
//! Per-line mutations with the billed-order freeze enforced inside the
//! same transaction as the write. Once an order reaches BILLED its lines
//! can never change again.

use super::{BaseRepository, RepoError, RepoResult, check_response, parse_ref};
use crate::db::models::{BillableLine, KitchenLine, LineItem, LineView};
use shared::OrderState;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use uuid::Uuid;

const TABLE: &str = "line_item";

#[derive(Clone)]
pub struct LineItemRepository {
    base: BaseRepository,
}

impl LineItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Add a line item to an order, starting in IN_PREPARATION.
    ///
    /// Aborts when the order is missing or already billed, or when the
    /// menu item is missing or disabled. Sibling lines are untouched.
    pub async fn add(
        &self,
        order_id: &str,
        menu_item_id: &str,
        quantity: i64,
        annotation: String,
    ) -> RepoResult<LineItem> {
        let order = parse_ref(order_id, "order")?;
        let menu_item = parse_ref(menu_item_id, "menu_item")?;
        let line = RecordId::from_table_key(TABLE, Uuid::new_v4().simple().to_string());

        let response = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 LET $o = (SELECT * FROM ONLY $order); \
                 IF $o IS NONE { THROW 'ORDER_NOT_FOUND' }; \
                 IF $o.state = 'BILLED' { THROW 'ORDER_BILLED' }; \
                 LET $m = (SELECT * FROM ONLY $menu_item); \
                 IF $m IS NONE { THROW 'MENU_ITEM_NOT_FOUND' }; \
                 IF $m.is_enabled = false { THROW 'MENU_ITEM_DISABLED' }; \
                 CREATE $line CONTENT { \
                     order_ref: $order, \
                     menu_item: $menu_item, \
                     quantity: $quantity, \
                     annotation: $annotation, \
                     state: 'IN_PREPARATION' \
                 }; \
                 COMMIT TRANSACTION;",
            )
            .bind(("order", order.clone()))
            .bind(("menu_item", menu_item.clone()))
            .bind(("line", line.clone()))
            .bind(("quantity", quantity))
            .bind(("annotation", annotation.clone()))
            .await?;
        check_response(response)?;

        Ok(LineItem {
            id: Some(line),
            order_ref: order,
            menu_item,
            quantity,
            annotation,
            state: OrderState::InPreparation,
        })
    }

    /// Find line item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<LineItem>> {
        let thing = parse_ref(id, TABLE)?;
        let line: Option<LineItem> = self.base.db().select(thing).await?;
        Ok(line)
    }

    /// Edit quantity and/or annotation; absent fields keep their value
    pub async fn update(
        &self,
        id: &str,
        quantity: Option<i64>,
        annotation: Option<String>,
    ) -> RepoResult<LineItem> {
        let thing = parse_ref(id, TABLE)?;
        let response = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 LET $l = (SELECT * FROM ONLY $line); \
                 IF $l IS NONE { THROW 'LINE_NOT_FOUND' }; \
                 LET $o = (SELECT * FROM ONLY $l.order_ref); \
                 IF $o.state = 'BILLED' { THROW 'ORDER_BILLED' }; \
                 UPDATE $line SET \
                     quantity = $quantity ?? $l.quantity, \
                     annotation = $annotation ?? $l.annotation; \
                 COMMIT TRANSACTION;",
            )
            .bind(("line", thing))
            .bind(("quantity", quantity))
            .bind(("annotation", annotation))
            .await?;
        check_response(response)?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Line item {} not found", id)))
    }

    /// Move a line to a new catalog state.
    ///
    /// On DELIVERED the owning order's updated_at is refreshed in the
    /// same transaction (used for reporting, not correctness).
    pub async fn set_state(&self, id: &str, state: OrderState, now: i64) -> RepoResult<LineItem> {
        let thing = parse_ref(id, TABLE)?;
        let response = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 LET $l = (SELECT * FROM ONLY $line); \
                 IF $l IS NONE { THROW 'LINE_NOT_FOUND' }; \
                 LET $o = (SELECT * FROM ONLY $l.order_ref); \
                 IF $o.state = 'BILLED' { THROW 'ORDER_BILLED' }; \
                 UPDATE $line SET state = $state; \
                 IF $state = 'DELIVERED' { \
                     UPDATE $l.order_ref SET updated_at = $now; \
                 }; \
                 COMMIT TRANSACTION;",
            )
            .bind(("line", thing))
            .bind(("state", state.as_str()))
            .bind(("now", now))
            .await?;
        check_response(response)?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Line item {} not found", id)))
    }

    /// Delete a single line; never touches the order or its siblings
    pub async fn remove(&self, id: &str) -> RepoResult<()> {
        let thing = parse_ref(id, TABLE)?;
        let response = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 LET $l = (SELECT * FROM ONLY $line); \
                 IF $l IS NONE { THROW 'LINE_NOT_FOUND' }; \
                 LET $o = (SELECT * FROM ONLY $l.order_ref); \
                 IF $o.state = 'BILLED' { THROW 'ORDER_BILLED' }; \
                 DELETE $line; \
                 COMMIT TRANSACTION;",
            )
            .bind(("line", thing))
            .await?;
        check_response(response)?;
        Ok(())
    }

    /// All line views for an order
    pub async fn find_by_order(&self, order_id: &str) -> RepoResult<Vec<LineView>> {
        let order = parse_ref(order_id, "order")?;
        let lines: Vec<LineView> = self
            .base
            .db()
            .query(
                "SELECT <string>id AS line_id, menu_item.name AS product_name, \
                 quantity, annotation, state \
                 FROM line_item WHERE order_ref = $order ORDER BY line_id",
            )
            .bind(("order", order))
            .await?
            .take(0)?;
        Ok(lines)
    }

    /// The states of an order's lines, for the eligibility predicate
    pub async fn states_for_order(&self, order_id: &str) -> RepoResult<Vec<OrderState>> {
        let order = parse_ref(order_id, "order")?;
        let states: Vec<OrderState> = self
            .base
            .db()
            .query("SELECT VALUE state FROM line_item WHERE order_ref = $order")
            .bind(("order", order))
            .await?
            .take(0)?;
        Ok(states)
    }

    /// Non-cancelled lines joined with the menu price, for invoicing
    pub async fn billable_lines(&self, order_id: &str) -> RepoResult<Vec<BillableLine>> {
        let order = parse_ref(order_id, "order")?;
        let lines: Vec<BillableLine> = self
            .base
            .db()
            .query(
                "SELECT <string>id AS line_id, menu_item.name AS product_name, \
                 quantity, menu_item.price AS unit_price, state \
                 FROM line_item \
                 WHERE order_ref = $order AND state != 'CANCELLED' \
                 ORDER BY line_id",
            )
            .bind(("order", order))
            .await?
            .take(0)?;
        Ok(lines)
    }

    /// Kitchen queue: every line still being worked on, oldest first
    pub async fn kitchen_queue(&self) -> RepoResult<Vec<KitchenLine>> {
        let lines: Vec<KitchenLine> = self
            .base
            .db()
            .query(
                "SELECT <string>id AS line_id, <string>order_ref AS order_id, \
                 order_ref.dining_table.number AS table_number, \
                 menu_item.name AS product_name, quantity, annotation, state \
                 FROM line_item \
                 WHERE state IN ['IN_PREPARATION', 'READY'] \
                 ORDER BY line_id",
            )
            .await?
            .take(0)?;
        Ok(lines)
    }
}
