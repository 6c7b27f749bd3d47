//! Billing eligibility
//!
//! The rule that decides when an order enters the payable worklist. The
//! predicate runs over an in-memory view of the order's line states, so
//! the same rule backs both the SQL worklist query and the pre-invoice
//! check, and can be exercised without a store.

use crate::state::OrderState;

/// Decide whether an order can be invoiced right now.
///
/// An order is payable when:
///
/// 1. it has not already been billed or cancelled as a whole, and
/// 2. every line item is payable-terminal (delivered or cancelled), and
/// 3. at least one line item was actually delivered.
///
/// Rule 3 covers two edge cases at once: an order whose every line was
/// cancelled has nothing to invoice, and an order with no lines at all
/// never becomes payable.
///
/// The result is recomputed from current line states on every call; line
/// states change from concurrent kitchen and table-service actions, so a
/// cached answer would go stale.
pub fn order_is_payable(order_state: OrderState, line_states: &[OrderState]) -> bool {
    if matches!(order_state, OrderState::Billed | OrderState::Cancelled) {
        return false;
    }
    if !line_states.iter().all(OrderState::is_payable_terminal) {
        return false;
    }
    line_states.contains(&OrderState::Delivered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderState::*;

    #[test]
    fn all_delivered_is_payable() {
        assert!(order_is_payable(InPreparation, &[Delivered, Delivered]));
    }

    #[test]
    fn delivered_and_cancelled_mix_is_payable() {
        assert!(order_is_payable(InPreparation, &[Delivered, Cancelled]));
    }

    #[test]
    fn pending_line_blocks_billing() {
        assert!(!order_is_payable(InPreparation, &[Delivered, InPreparation]));
        assert!(!order_is_payable(InPreparation, &[Delivered, Ready]));
    }

    #[test]
    fn all_cancelled_has_nothing_to_invoice() {
        assert!(!order_is_payable(InPreparation, &[Cancelled, Cancelled]));
    }

    #[test]
    fn empty_order_is_not_payable() {
        assert!(!order_is_payable(InPreparation, &[]));
    }

    #[test]
    fn billed_order_is_never_payable_again() {
        assert!(!order_is_payable(Billed, &[Delivered, Delivered]));
    }

    #[test]
    fn cancelled_order_is_not_payable() {
        assert!(!order_is_payable(Cancelled, &[Delivered]));
    }

    #[test]
    fn billed_lines_do_not_requalify() {
        // Lines already settled by an earlier invoice must not make the
        // order payable a second time.
        assert!(!order_is_payable(InPreparation, &[Billed, Billed]));
    }
}
