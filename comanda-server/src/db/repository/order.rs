//! Order Repository
//!
//! Owns the order rows and the payable-worklist query. The worklist is
//! recomputed on every call from current line states: per order, no line
//! may remain outside the payable-terminal pair and at least one line
//! must have been delivered.

use super::{BaseRepository, RepoError, RepoResult, check_response, parse_ref};
use crate::db::models::{Order, OrderDetail, OrderSummary, PayableOrder};
use shared::OrderState;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a new order in state IN_PREPARATION with total 0.
    ///
    /// The waiter and table references are resolved first so a typo'd id
    /// fails with NotFound instead of producing a dangling reference.
    pub async fn create(&self, employee_id: &str, table_id: &str, now: i64) -> RepoResult<Order> {
        let employee = parse_ref(employee_id, "employee")?;
        let dining_table = parse_ref(table_id, "dining_table")?;

        let found: Option<crate::db::models::Employee> =
            self.base.db().select(employee.clone()).await?;
        if found.is_none() {
            return Err(RepoError::NotFound(format!(
                "Employee {} not found",
                employee_id
            )));
        }
        let found: Option<crate::db::models::DiningTable> =
            self.base.db().select(dining_table.clone()).await?;
        if found.is_none() {
            return Err(RepoError::NotFound(format!("Table {} not found", table_id)));
        }

        // Manual CREATE so the references are stored as record links, not
        // as the "table:id" strings the API serializer emits
        let mut result = self
            .base
            .db()
            .query(
                "CREATE order CONTENT { \
                     employee: $employee, \
                     dining_table: $dining_table, \
                     state: 'IN_PREPARATION', \
                     total: 0, \
                     created_at: $now, \
                     updated_at: $now \
                 }",
            )
            .bind(("employee", employee))
            .bind(("dining_table", dining_table))
            .bind(("now", now))
            .await?;
        let created: Vec<Order> = result.take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing = parse_ref(id, TABLE)?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// List all orders with joined waiter name and table number
    pub async fn find_all(&self) -> RepoResult<Vec<OrderSummary>> {
        let orders: Vec<OrderSummary> = self
            .base
            .db()
            .query(
                "SELECT <string>id AS order_id, employee.name AS waiter_name, \
                 dining_table.number AS table_number, state, created_at \
                 FROM order ORDER BY order_id",
            )
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// The payable worklist.
    ///
    /// An order qualifies when it is not already billed or cancelled,
    /// no line is still in preparation or ready, and at least one line
    /// was delivered (all-cancelled orders have nothing to invoice).
    /// Recomputed per call; line states change underneath us.
    pub async fn find_payable(&self) -> RepoResult<Vec<PayableOrder>> {
        let orders: Vec<PayableOrder> = self
            .base
            .db()
            .query(
                "SELECT <string>id AS order_id, employee.name AS waiter_name, \
                 dining_table.number AS table_number, state \
                 FROM order \
                 WHERE state NOT IN ['BILLED', 'CANCELLED'] \
                 AND count(SELECT VALUE id FROM line_item \
                     WHERE order_ref = $parent.id \
                     AND state NOT IN ['DELIVERED', 'CANCELLED']) = 0 \
                 AND count(SELECT VALUE id FROM line_item \
                     WHERE order_ref = $parent.id AND state = 'DELIVERED') > 0 \
                 ORDER BY order_id",
            )
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// One order with its lines, for the ticket-edit view
    pub async fn find_detail(&self, id: &str) -> RepoResult<Option<OrderDetail>> {
        let thing = parse_ref(id, TABLE)?;
        let mut result = self
            .base
            .db()
            .query(
                "SELECT <string>id AS order_id, employee.name AS waiter_name, \
                 dining_table.number AS table_number, state, total, created_at, updated_at, \
                 (SELECT <string>id AS line_id, menu_item.name AS product_name, \
                  quantity, annotation, state \
                  FROM line_item WHERE order_ref = $parent.id ORDER BY line_id) AS lines \
                 FROM order WHERE id = $id",
            )
            .bind(("id", thing))
            .await?;
        let details: Vec<OrderDetail> = result.take(0)?;
        Ok(details.into_iter().next())
    }

    /// Direct state override.
    ///
    /// BILLED is locked: an already-billed order cannot be moved, and the
    /// handler refuses to set BILLED through this path (only invoicing
    /// finalizes). Runs as one transaction so the check and the write
    /// cannot interleave with billing.
    pub async fn set_state(&self, id: &str, state: OrderState, now: i64) -> RepoResult<()> {
        let thing = parse_ref(id, TABLE)?;
        let response = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 LET $o = (SELECT * FROM ONLY $order); \
                 IF $o IS NONE { THROW 'ORDER_NOT_FOUND' }; \
                 IF $o.state = 'BILLED' { THROW 'ORDER_BILLED' }; \
                 UPDATE $order SET state = $state, updated_at = $now; \
                 COMMIT TRANSACTION;",
            )
            .bind(("order", thing))
            .bind(("state", state.as_str()))
            .bind(("now", now))
            .await?;
        check_response(response)?;
        Ok(())
    }

    /// Cascading delete: lines first, then the order, in one transaction
    pub async fn delete_cascade(&self, id: &str) -> RepoResult<()> {
        let thing = parse_ref(id, TABLE)?;
        let response = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 LET $o = (SELECT * FROM ONLY $order); \
                 IF $o IS NONE { THROW 'ORDER_NOT_FOUND' }; \
                 DELETE line_item WHERE order_ref = $order; \
                 DELETE $order; \
                 COMMIT TRANSACTION;",
            )
            .bind(("order", thing))
            .await?;
        check_response(response)?;
        Ok(())
    }
}
