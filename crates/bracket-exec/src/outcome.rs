//! Action outcome heuristics.
//!
//! Broker-side order state is never observed directly; all we see is its
//! rendered projection, read moments after an action. These comparisons
//! therefore report confidence, not truth: definite signals become
//! `success` and `changes`, the absence of any signal becomes a warning
//! (the read can race the repaint), and only a table moving the wrong way
//! becomes an error.

use serde::{Deserialize, Serialize};

use bracket_core::OrderSnapshot;

/// Outcome of one panel action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReport {
    /// At least one definite success signal was observed.
    pub success: bool,
    /// Human-readable descriptions of what changed.
    pub changes: Vec<String>,
    /// Non-fatal observations, including the ambiguous no-change case.
    pub warnings: Vec<String>,
    /// Definite contradictions of the intended effect.
    pub errors: Vec<String>,
}

impl ActionReport {
    /// No success signal, but nothing contradicted the action either.
    pub fn is_ambiguous(&self) -> bool {
        !self.success && self.errors.is_empty()
    }

    pub(crate) fn warn_no_change(mut self) -> Self {
        if self.changes.is_empty() && self.errors.is_empty() {
            self.warnings.push(
                "no detectable change; the action may have succeeded before the tables repainted"
                    .to_string(),
            );
        }
        self
    }
}

/// Judge a cancel-type action (cancel-all, flatten) from two snapshots.
///
/// Success signals, any one of which suffices:
/// - the visible order count decreased,
/// - the open position count decreased,
/// - an order id present before is gone after (named in `changes`).
///
/// No signal at all is reported as a warning rather than a failure. An
/// order count that *increased* is a definite error: a cancel action must
/// never grow the table.
pub fn diff_order_state(before: &OrderSnapshot, after: &OrderSnapshot) -> ActionReport {
    let mut report = ActionReport::default();

    let after_ids = after.order_ids();
    for order in &before.orders {
        if !after_ids.contains(order.id.as_str()) {
            report
                .changes
                .push(format!("order {} cancelled (no longer listed)", order.id));
        }
    }

    if after.orders.len() < before.orders.len() {
        report.changes.push(format!(
            "order count {} -> {}",
            before.orders.len(),
            after.orders.len()
        ));
    }

    let (pos_before, pos_after) = (before.open_position_count(), after.open_position_count());
    if pos_after < pos_before {
        report
            .changes
            .push(format!("open positions {pos_before} -> {pos_after}"));
    }

    report.success = !report.changes.is_empty();

    if after.orders.len() > before.orders.len() {
        report.errors.push(format!(
            "order count increased {} -> {} after a cancel action",
            before.orders.len(),
            after.orders.len()
        ));
    }

    report.warn_no_change()
}

/// Judge an entry submission from two snapshots.
///
/// The mirror of [`diff_order_state`]: new order ids, a grown order
/// table, or a changed position are success signals; silence is the same
/// ambiguous warning. A market entry can fill before the first poll, so
/// position movement counts even when no new order row is visible.
pub fn confirm_submission(before: &OrderSnapshot, after: &OrderSnapshot) -> ActionReport {
    let mut report = ActionReport::default();

    let before_ids = before.order_ids();
    for order in &after.orders {
        if !before_ids.contains(order.id.as_str()) {
            report
                .changes
                .push(format!("order {} appeared ({})", order.id, order.status));
        }
    }

    if after.orders.len() > before.orders.len() {
        report.changes.push(format!(
            "order count {} -> {}",
            before.orders.len(),
            after.orders.len()
        ));
    }

    for pos_after in &after.positions {
        let net_before = before
            .positions
            .iter()
            .find(|p| p.symbol == pos_after.symbol)
            .map(|p| p.net_quantity)
            .unwrap_or(0);
        if pos_after.net_quantity != net_before {
            report.changes.push(format!(
                "position {} {} -> {}",
                pos_after.symbol, net_before, pos_after.net_quantity
            ));
        }
    }

    report.success = !report.changes.is_empty();
    report.warn_no_change()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bracket_core::{OrderRow, OrderStatus, PositionRow, TradeAction};
    use chrono::Utc;

    fn order(id: &str) -> OrderRow {
        OrderRow {
            id: id.into(),
            symbol: "NQZ5".into(),
            action: Some(TradeAction::Buy),
            quantity: Some(1),
            status: OrderStatus::Working,
        }
    }

    fn snapshot(orders: Vec<OrderRow>, positions: Vec<PositionRow>) -> OrderSnapshot {
        OrderSnapshot {
            orders,
            positions,
            captured_at: Utc::now(),
        }
    }

    #[test]
    fn test_disappeared_order_is_success() {
        let before = snapshot(vec![order("1"), order("2")], vec![]);
        let after = snapshot(vec![order("1")], vec![]);

        let report = diff_order_state(&before, &after);
        assert!(report.success);
        assert!(report.errors.is_empty());
        assert!(
            report.changes.iter().any(|c| c.contains("order 2")),
            "expected a change naming order 2: {:?}",
            report.changes
        );
    }

    #[test]
    fn test_identical_snapshots_warn_not_error() {
        let before = snapshot(vec![order("1"), order("2")], vec![]);
        let after = before.clone();

        let report = diff_order_state(&before, &after);
        assert!(!report.success);
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.is_ambiguous());
    }

    #[test]
    fn test_grown_order_table_is_error() {
        let before = snapshot(vec![order("1")], vec![]);
        let after = snapshot(vec![order("1"), order("2")], vec![]);

        let report = diff_order_state(&before, &after);
        assert!(!report.success);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("increased"));
        assert!(!report.is_ambiguous());
    }

    #[test]
    fn test_position_decrease_is_success() {
        let before = snapshot(
            vec![],
            vec![PositionRow {
                symbol: "NQZ5".into(),
                net_quantity: 2,
            }],
        );
        let after = snapshot(
            vec![],
            vec![PositionRow {
                symbol: "NQZ5".into(),
                net_quantity: 0,
            }],
        );

        let report = diff_order_state(&before, &after);
        assert!(report.success);
        assert!(report.changes.iter().any(|c| c.contains("positions")));
    }

    #[test]
    fn test_confirm_submission_new_order() {
        let before = snapshot(vec![order("1")], vec![]);
        let after = snapshot(vec![order("1"), order("2")], vec![]);

        let report = confirm_submission(&before, &after);
        assert!(report.success);
        assert!(report.changes.iter().any(|c| c.contains("order 2")));
    }

    #[test]
    fn test_confirm_submission_market_fill_shows_as_position() {
        // Entry filled before the first poll: no new order row, but the
        // position table moved.
        let before = snapshot(vec![], vec![]);
        let after = snapshot(
            vec![],
            vec![PositionRow {
                symbol: "NQZ5".into(),
                net_quantity: 1,
            }],
        );

        let report = confirm_submission(&before, &after);
        assert!(report.success);
        assert!(report.changes.iter().any(|c| c.contains("position NQZ5")));
    }

    #[test]
    fn test_confirm_submission_no_change_is_ambiguous() {
        let before = snapshot(vec![order("1")], vec![]);
        let after = before.clone();

        let report = confirm_submission(&before, &after);
        assert!(!report.success);
        assert!(report.is_ambiguous());
        assert_eq!(report.warnings.len(), 1);
    }
}
