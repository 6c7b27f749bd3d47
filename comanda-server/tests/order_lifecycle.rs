//! Order lifecycle over a real embedded database
//!
//! Exercises the repositories end to end: creation, line state moves,
//! the payable worklist, invoicing and the billed freeze.

mod common;

use comanda_server::billing;
use comanda_server::db::models::Order;
use comanda_server::db::repository::{
    LineItemRepository, OrderRepository, RepoError, SaleRepository,
};
use shared::OrderState;

const T0: i64 = 1_700_000_000_000;

async fn place_order(state: &comanda_server::ServerState) -> Order {
    OrderRepository::new(state.db.clone())
        .create("employee:ana", "dining_table:t5", T0)
        .await
        .unwrap()
}

fn id_of(order: &Order) -> String {
    order.id.as_ref().unwrap().to_string()
}

#[tokio::test]
async fn end_to_end_billing_flow() {
    let ctx = common::setup_seeded().await;
    let orders = OrderRepository::new(ctx.state.db.clone());
    let lines = LineItemRepository::new(ctx.state.db.clone());
    let sales = SaleRepository::new(ctx.state.db.clone());

    // Ana opens table 5: 2x Burger + 1x Soda
    let order = place_order(&ctx.state).await;
    let order_id = id_of(&order);
    assert_eq!(order.state, OrderState::InPreparation);
    assert_eq!(order.total, 0);

    let burger = lines
        .add(&order_id, "menu_item:burger", 2, "Sin observaciones".into())
        .await
        .unwrap();
    let soda = lines
        .add(&order_id, "menu_item:soda", 1, "No ice".into())
        .await
        .unwrap();
    assert_eq!(burger.state, OrderState::InPreparation);

    // Nothing delivered yet: not payable
    assert!(orders.find_payable().await.unwrap().is_empty());

    // Kitchen finishes and both items reach the table
    let burger_id = burger.id.as_ref().unwrap().to_string();
    let soda_id = soda.id.as_ref().unwrap().to_string();
    lines
        .set_state(&burger_id, OrderState::Delivered, T0 + 1_000)
        .await
        .unwrap();
    lines
        .set_state(&soda_id, OrderState::Delivered, T0 + 2_000)
        .await
        .unwrap();

    // Now the order shows up in the payable worklist
    let payable = orders.find_payable().await.unwrap();
    assert_eq!(payable.len(), 1);
    assert_eq!(payable[0].order_id, order_id);
    assert_eq!(payable[0].waiter_name, "Ana");
    assert_eq!(payable[0].table_number, 5);

    // Invoice: 2 x 10.0 + 1 x 3.0 = 23
    let billable = lines.billable_lines(&order_id).await.unwrap();
    let invoice = billing::compute_invoice(&order_id, &billable);
    assert_eq!(invoice.total, 23);

    let sale_id = sales
        .create_invoice(&order_id, invoice.to_drafts(), invoice.total, T0 + 3_000)
        .await
        .unwrap();

    // Order finalized: BILLED with the grand total, lines frozen as BILLED
    let billed = orders.find_by_id(&order_id).await.unwrap().unwrap();
    assert_eq!(billed.state, OrderState::Billed);
    assert_eq!(billed.total, 23);
    for line_state in lines.states_for_order(&order_id).await.unwrap() {
        assert_eq!(line_state, OrderState::Billed);
    }

    // The persisted sale's items sum to the persisted total
    let detail = sales
        .find_detail(&sale_id.to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.order_id, order_id);
    assert_eq!(detail.total, 23);
    assert_eq!(detail.items.len(), 2);
    let item_sum: i64 = detail.items.iter().map(|i| i.subtotal).sum();
    assert_eq!(item_sum, detail.total);

    // A second invoice attempt must not create a duplicate sale
    let err = sales
        .create_invoice(&order_id, Vec::new(), 0, T0 + 4_000)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));

    // A billed order no longer appears as payable
    assert!(orders.find_payable().await.unwrap().is_empty());
}

#[tokio::test]
async fn payable_excludes_pending_and_ready_lines() {
    let ctx = common::setup_seeded().await;
    let orders = OrderRepository::new(ctx.state.db.clone());
    let lines = LineItemRepository::new(ctx.state.db.clone());

    let order = place_order(&ctx.state).await;
    let order_id = id_of(&order);
    let a = lines
        .add(&order_id, "menu_item:burger", 1, "Sin observaciones".into())
        .await
        .unwrap();
    let b = lines
        .add(&order_id, "menu_item:soda", 1, "Sin observaciones".into())
        .await
        .unwrap();

    let a_id = a.id.as_ref().unwrap().to_string();
    let b_id = b.id.as_ref().unwrap().to_string();
    lines
        .set_state(&a_id, OrderState::Delivered, T0)
        .await
        .unwrap();

    // One line still IN_PREPARATION: blocked
    assert!(orders.find_payable().await.unwrap().is_empty());

    // READY is still not payable-terminal
    lines.set_state(&b_id, OrderState::Ready, T0).await.unwrap();
    assert!(orders.find_payable().await.unwrap().is_empty());

    lines
        .set_state(&b_id, OrderState::Cancelled, T0)
        .await
        .unwrap();
    assert_eq!(orders.find_payable().await.unwrap().len(), 1);
}

#[tokio::test]
async fn payable_excludes_all_cancelled_and_empty_orders() {
    let ctx = common::setup_seeded().await;
    let orders = OrderRepository::new(ctx.state.db.clone());
    let lines = LineItemRepository::new(ctx.state.db.clone());

    // Order with no lines at all: nothing to invoice
    let _empty = place_order(&ctx.state).await;
    assert!(orders.find_payable().await.unwrap().is_empty());

    // Every line cancelled: excluded too
    let cancelled = place_order(&ctx.state).await;
    let cancelled_id = id_of(&cancelled);
    let line = lines
        .add(&cancelled_id, "menu_item:burger", 1, "Sin observaciones".into())
        .await
        .unwrap();
    lines
        .set_state(&line.id.as_ref().unwrap().to_string(), OrderState::Cancelled, T0)
        .await
        .unwrap();

    assert!(orders.find_payable().await.unwrap().is_empty());
}

#[tokio::test]
async fn invoice_rejected_while_lines_pending() {
    let ctx = common::setup_seeded().await;
    let lines = LineItemRepository::new(ctx.state.db.clone());
    let sales = SaleRepository::new(ctx.state.db.clone());

    let order = place_order(&ctx.state).await;
    let order_id = id_of(&order);
    lines
        .add(&order_id, "menu_item:burger", 1, "Sin observaciones".into())
        .await
        .unwrap();

    // Eligibility is re-checked inside the billing transaction itself
    let billable = lines.billable_lines(&order_id).await.unwrap();
    let invoice = billing::compute_invoice(&order_id, &billable);
    let err = sales
        .create_invoice(&order_id, invoice.to_drafts(), invoice.total, T0)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));

    // Nothing was persisted by the aborted transaction
    let order_after = OrderRepository::new(ctx.state.db.clone())
        .find_by_id(&order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order_after.state, OrderState::InPreparation);
    assert_eq!(order_after.total, 0);
}

#[tokio::test]
async fn billed_order_lines_are_frozen() {
    let ctx = common::setup_seeded().await;
    let lines = LineItemRepository::new(ctx.state.db.clone());
    let sales = SaleRepository::new(ctx.state.db.clone());

    let order = place_order(&ctx.state).await;
    let order_id = id_of(&order);
    let line = lines
        .add(&order_id, "menu_item:burger", 1, "Sin observaciones".into())
        .await
        .unwrap();
    let line_id = line.id.as_ref().unwrap().to_string();
    lines
        .set_state(&line_id, OrderState::Delivered, T0)
        .await
        .unwrap();

    let billable = lines.billable_lines(&order_id).await.unwrap();
    let invoice = billing::compute_invoice(&order_id, &billable);
    sales
        .create_invoice(&order_id, invoice.to_drafts(), invoice.total, T0)
        .await
        .unwrap();

    // Edits, state moves, removals and additions are all rejected now
    let err = lines.update(&line_id, Some(3), None).await.unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));

    let err = lines
        .set_state(&line_id, OrderState::Cancelled, T0)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));

    let err = lines.remove(&line_id).await.unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));

    let err = lines
        .add(&order_id, "menu_item:soda", 1, "Sin observaciones".into())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));
}

#[tokio::test]
async fn cascade_delete_removes_all_lines() {
    let ctx = common::setup_seeded().await;
    let orders = OrderRepository::new(ctx.state.db.clone());
    let lines = LineItemRepository::new(ctx.state.db.clone());

    let order = place_order(&ctx.state).await;
    let order_id = id_of(&order);
    for _ in 0..3 {
        lines
            .add(&order_id, "menu_item:burger", 1, "Sin observaciones".into())
            .await
            .unwrap();
    }
    assert_eq!(lines.find_by_order(&order_id).await.unwrap().len(), 3);

    orders.delete_cascade(&order_id).await.unwrap();

    assert!(orders.find_by_id(&order_id).await.unwrap().is_none());
    assert!(lines.find_by_order(&order_id).await.unwrap().is_empty());

    // Deleting again reports the order as gone
    let err = orders.delete_cascade(&order_id).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn delivery_refreshes_order_timestamp() {
    let ctx = common::setup_seeded().await;
    let orders = OrderRepository::new(ctx.state.db.clone());
    let lines = LineItemRepository::new(ctx.state.db.clone());

    let order = place_order(&ctx.state).await;
    let order_id = id_of(&order);
    let line = lines
        .add(&order_id, "menu_item:burger", 1, "Sin observaciones".into())
        .await
        .unwrap();
    let line_id = line.id.as_ref().unwrap().to_string();

    // READY does not touch the order row
    lines
        .set_state(&line_id, OrderState::Ready, T0 + 5_000)
        .await
        .unwrap();
    let after_ready = orders.find_by_id(&order_id).await.unwrap().unwrap();
    assert_eq!(after_ready.updated_at, T0);

    // DELIVERED refreshes last activity
    lines
        .set_state(&line_id, OrderState::Delivered, T0 + 9_000)
        .await
        .unwrap();
    let after_delivery = orders.find_by_id(&order_id).await.unwrap().unwrap();
    assert_eq!(after_delivery.updated_at, T0 + 9_000);
}

#[tokio::test]
async fn add_line_validates_order_and_menu_item() {
    let ctx = common::setup_seeded().await;
    let lines = LineItemRepository::new(ctx.state.db.clone());

    let order = place_order(&ctx.state).await;
    let order_id = id_of(&order);

    let err = lines
        .add("order:missing", "menu_item:burger", 1, "Sin observaciones".into())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));

    let err = lines
        .add(&order_id, "menu_item:missing", 1, "Sin observaciones".into())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));

    // Disabled items cannot be ordered
    let err = lines
        .add(&order_id, "menu_item:special", 1, "Sin observaciones".into())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    // A reference pointing at the wrong table is rejected outright
    let err = lines
        .add(&order_id, "employee:ana", 1, "Sin observaciones".into())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn update_preserves_absent_fields() {
    let ctx = common::setup_seeded().await;
    let lines = LineItemRepository::new(ctx.state.db.clone());

    let order = place_order(&ctx.state).await;
    let order_id = id_of(&order);
    let line = lines
        .add(&order_id, "menu_item:burger", 1, "extra rare".into())
        .await
        .unwrap();
    let line_id = line.id.as_ref().unwrap().to_string();

    let updated = lines.update(&line_id, Some(4), None).await.unwrap();
    assert_eq!(updated.quantity, 4);
    assert_eq!(updated.annotation, "extra rare");

    let updated = lines
        .update(&line_id, None, Some("no salt".to_string()))
        .await
        .unwrap();
    assert_eq!(updated.quantity, 4);
    assert_eq!(updated.annotation, "no salt");
}

#[tokio::test]
async fn truncated_subtotals_persist_exactly() {
    let ctx = common::setup_seeded().await;
    let lines = LineItemRepository::new(ctx.state.db.clone());
    let sales = SaleRepository::new(ctx.state.db.clone());

    // 3 x Espresso at 2.33: subtotal must be 6, not 7
    let order = place_order(&ctx.state).await;
    let order_id = id_of(&order);
    let line = lines
        .add(&order_id, "menu_item:espresso", 3, "Sin observaciones".into())
        .await
        .unwrap();
    lines
        .set_state(&line.id.as_ref().unwrap().to_string(), OrderState::Delivered, T0)
        .await
        .unwrap();

    let billable = lines.billable_lines(&order_id).await.unwrap();
    let invoice = billing::compute_invoice(&order_id, &billable);
    assert_eq!(invoice.lines[0].subtotal, 6);
    assert_eq!(invoice.total, 6);

    let sale_id = sales
        .create_invoice(&order_id, invoice.to_drafts(), invoice.total, T0)
        .await
        .unwrap();
    let detail = sales
        .find_detail(&sale_id.to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.total, 6);
    assert_eq!(detail.items[0].subtotal, 6);
}

#[tokio::test]
async fn cancelled_lines_are_excluded_from_the_invoice() {
    let ctx = common::setup_seeded().await;
    let lines = LineItemRepository::new(ctx.state.db.clone());

    let order = place_order(&ctx.state).await;
    let order_id = id_of(&order);
    let keep = lines
        .add(&order_id, "menu_item:burger", 2, "Sin observaciones".into())
        .await
        .unwrap();
    let void = lines
        .add(&order_id, "menu_item:soda", 5, "Sin observaciones".into())
        .await
        .unwrap();

    lines
        .set_state(&keep.id.as_ref().unwrap().to_string(), OrderState::Delivered, T0)
        .await
        .unwrap();
    lines
        .set_state(&void.id.as_ref().unwrap().to_string(), OrderState::Cancelled, T0)
        .await
        .unwrap();

    let billable = lines.billable_lines(&order_id).await.unwrap();
    assert_eq!(billable.len(), 1);
    assert_eq!(billable[0].product_name, "Burger");

    let invoice = billing::compute_invoice(&order_id, &billable);
    assert_eq!(invoice.total, 20);
}
