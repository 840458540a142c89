//! Point-in-time readings of the visible order and position tables.
//!
//! A snapshot is derived data scraped from the page. It exists only to be
//! compared against a later snapshot of the same tables; it is never stored
//! and carries no authority about actual broker-side state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::order::{OrderStatus, TradeAction};

/// One row of the visible order table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRow {
    /// Order id as rendered; synthesized from the row position when the
    /// table does not show one.
    pub id: String,
    /// Contract symbol.
    pub symbol: String,
    /// Side, when the side cell could be parsed.
    pub action: Option<TradeAction>,
    /// Contract count, when the quantity cell could be parsed.
    pub quantity: Option<u32>,
    /// Parsed status; `Unknown` when the cell text is unrecognized.
    pub status: OrderStatus,
}

/// One row of the visible position table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRow {
    /// Contract symbol.
    pub symbol: String,
    /// Signed net contract count (negative = short).
    pub net_quantity: i64,
}

impl PositionRow {
    /// Whether the row represents an open position.
    pub fn is_open(&self) -> bool {
        self.net_quantity != 0
    }
}

/// Snapshot of both tables at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub orders: Vec<OrderRow>,
    pub positions: Vec<PositionRow>,
    pub captured_at: DateTime<Utc>,
}

impl OrderSnapshot {
    /// Create an empty snapshot stamped now.
    pub fn empty() -> Self {
        Self {
            orders: Vec::new(),
            positions: Vec::new(),
            captured_at: Utc::now(),
        }
    }

    /// The ids of every visible order.
    pub fn order_ids(&self) -> HashSet<&str> {
        self.orders.iter().map(|o| o.id.as_str()).collect()
    }

    /// Orders still live at the exchange.
    pub fn working_orders(&self) -> impl Iterator<Item = &OrderRow> {
        self.orders.iter().filter(|o| o.status.is_active())
    }

    /// Number of open (non-flat) positions.
    pub fn open_position_count(&self) -> usize {
        self.positions.iter().filter(|p| p.is_open()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str, status: OrderStatus) -> OrderRow {
        OrderRow {
            id: id.into(),
            symbol: "NQZ5".into(),
            action: Some(TradeAction::Buy),
            quantity: Some(1),
            status,
        }
    }

    #[test]
    fn test_order_ids() {
        let snap = OrderSnapshot {
            orders: vec![
                order("1", OrderStatus::Working),
                order("2", OrderStatus::Working),
            ],
            positions: vec![],
            captured_at: Utc::now(),
        };
        let ids = snap.order_ids();
        assert!(ids.contains("1"));
        assert!(ids.contains("2"));
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_working_orders_excludes_terminal() {
        let snap = OrderSnapshot {
            orders: vec![
                order("1", OrderStatus::Working),
                order("2", OrderStatus::Filled),
                order("3", OrderStatus::Cancelled),
            ],
            positions: vec![],
            captured_at: Utc::now(),
        };
        let working: Vec<_> = snap.working_orders().collect();
        assert_eq!(working.len(), 1);
        assert_eq!(working[0].id, "1");
    }

    #[test]
    fn test_open_position_count_ignores_flat_rows() {
        let snap = OrderSnapshot {
            orders: vec![],
            positions: vec![
                PositionRow {
                    symbol: "NQZ5".into(),
                    net_quantity: 2,
                },
                PositionRow {
                    symbol: "ESZ5".into(),
                    net_quantity: 0,
                },
                PositionRow {
                    symbol: "GCZ5".into(),
                    net_quantity: -1,
                },
            ],
            captured_at: Utc::now(),
        };
        assert_eq!(snap.open_position_count(), 2);
    }
}
