//! Sale Repository
//!
//! Invoice persistence. The whole of invoice creation is one logical
//! transaction: eligibility is re-checked under the transaction, then
//! the sale, its items, the line freeze and the order finalization all
//! commit together or not at all.

use super::{BaseRepository, RepoResult, check_response, parse_ref};
use crate::db::models::{SaleDetail, SaleItemDraft};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use uuid::Uuid;

const TABLE: &str = "sale";

#[derive(Clone)]
pub struct SaleRepository {
    base: BaseRepository,
}

impl SaleRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist an invoice for an order and finalize its state.
    ///
    /// Aborts (rolling everything back) when the order is missing,
    /// already billed or cancelled, still has a line in preparation or
    /// ready, or has no delivered line. The re-check inside the
    /// transaction closes the race with concurrent kitchen actions; a
    /// second invoice attempt on the same order trips the BILLED guard,
    /// so no duplicate sale can ever be written.
    pub async fn create_invoice(
        &self,
        order_id: &str,
        items: Vec<SaleItemDraft>,
        total: i64,
        now: i64,
    ) -> RepoResult<RecordId> {
        let order = parse_ref(order_id, "order")?;
        let sale = RecordId::from_table_key(TABLE, Uuid::new_v4().simple().to_string());

        let response = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 LET $o = (SELECT * FROM ONLY $order); \
                 IF $o IS NONE { THROW 'ORDER_NOT_FOUND' }; \
                 IF $o.state IN ['BILLED', 'CANCELLED'] { THROW 'ORDER_NOT_BILLABLE' }; \
                 LET $blocking = count(SELECT VALUE id FROM line_item \
                     WHERE order_ref = $order \
                     AND state NOT IN ['DELIVERED', 'CANCELLED']); \
                 IF $blocking > 0 { THROW 'ORDER_NOT_BILLABLE' }; \
                 LET $delivered = count(SELECT VALUE id FROM line_item \
                     WHERE order_ref = $order AND state = 'DELIVERED'); \
                 IF $delivered = 0 { THROW 'ORDER_NOT_BILLABLE' }; \
                 CREATE $sale CONTENT { order_ref: $order, total: $total, created_at: $now }; \
                 FOR $item IN $items { \
                     CREATE sale_item CONTENT { \
                         sale: $sale, \
                         product_name: $item.product_name, \
                         quantity: $item.quantity, \
                         unit_price: $item.unit_price, \
                         subtotal: $item.subtotal \
                     }; \
                 }; \
                 UPDATE line_item SET state = 'BILLED' \
                     WHERE order_ref = $order AND state != 'CANCELLED'; \
                 UPDATE $order SET state = 'BILLED', total = $total, updated_at = $now; \
                 COMMIT TRANSACTION;",
            )
            .bind(("order", order))
            .bind(("sale", sale.clone()))
            .bind(("items", items))
            .bind(("total", total))
            .bind(("now", now))
            .await?;
        check_response(response)?;

        Ok(sale)
    }

    /// Fetch a persisted sale with its items
    pub async fn find_detail(&self, id: &str) -> RepoResult<Option<SaleDetail>> {
        let thing = parse_ref(id, TABLE)?;
        let mut result = self
            .base
            .db()
            .query(
                "SELECT <string>id AS sale_id, <string>order_ref AS order_id, \
                 total, created_at, \
                 (SELECT product_name, quantity, unit_price, subtotal \
                  FROM sale_item WHERE sale = $parent.id ORDER BY product_name) AS items \
                 FROM sale WHERE id = $id",
            )
            .bind(("id", thing))
            .await?;
        let details: Vec<SaleDetail> = result.take(0)?;
        Ok(details.into_iter().next())
    }
}
