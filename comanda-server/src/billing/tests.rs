use super::*;
use shared::OrderState;

fn line(id: &str, name: &str, quantity: i64, unit_price: f64) -> BillableLine {
    BillableLine {
        line_id: id.to_string(),
        product_name: name.to_string(),
        quantity,
        unit_price,
        state: OrderState::Delivered,
    }
}

#[test]
fn subtotal_truncates_not_rounds() {
    // 3 × 2.33 = 6.99 → 6, never 7
    assert_eq!(line_subtotal(3, 2.33), 6);
    assert_eq!(line_subtotal(1, 0.99), 0);
    assert_eq!(line_subtotal(2, 9.999), 19);
}

#[test]
fn subtotal_exact_prices() {
    assert_eq!(line_subtotal(2, 10.0), 20);
    assert_eq!(line_subtotal(1, 3.0), 3);
    assert_eq!(line_subtotal(4, 2.5), 10);
}

#[test]
fn subtotal_avoids_float_accumulation() {
    // 10 × 0.1 must be exactly 1, not 0 (0.9999... truncated)
    assert_eq!(line_subtotal(10, 0.1), 1);
    // 100 × 0.07: f64 gives 7.000000000000001, Decimal gives exactly 7
    assert_eq!(line_subtotal(100, 0.07), 7);
}

#[test]
fn total_is_sum_of_truncated_subtotals() {
    // Truncation applies per line, then the total sums the integers:
    // 3×2.33 → 6 and 1×2.99 → 2, so 8 (not trunc(6.99 + 2.99) = 9)
    let invoice = compute_invoice(
        "order:t1",
        &[line("line_item:a", "Espresso", 3, 2.33), line("line_item:b", "Cookie", 1, 2.99)],
    );
    assert_eq!(invoice.lines[0].subtotal, 6);
    assert_eq!(invoice.lines[1].subtotal, 2);
    assert_eq!(invoice.total, 8);
}

#[test]
fn burger_and_soda_scenario() {
    // 2 × Burger (10.0) + 1 × Soda (3.0) = 23
    let invoice = compute_invoice(
        "order:t2",
        &[line("line_item:a", "Burger", 2, 10.0), line("line_item:b", "Soda", 1, 3.0)],
    );
    assert_eq!(invoice.total, 23);
}

#[test]
fn empty_line_set_totals_zero() {
    let invoice = compute_invoice("order:t3", &[]);
    assert!(invoice.lines.is_empty());
    assert_eq!(invoice.total, 0);
}

#[test]
fn drafts_mirror_priced_lines() {
    let invoice = compute_invoice("order:t4", &[line("line_item:a", "Burger", 2, 10.0)]);
    let drafts = invoice.to_drafts();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].product_name, "Burger");
    assert_eq!(drafts[0].quantity, 2);
    assert_eq!(drafts[0].subtotal, 20);
}
