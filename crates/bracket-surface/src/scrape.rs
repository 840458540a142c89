//! Order and position table scraping.
//!
//! Reads the rendered tables into an [`OrderSnapshot`]. The tables are a
//! projection of broker state drawn by someone else's frontend, so parsing
//! is lenient everywhere: unrecognized side or status text degrades to
//! `None`/`Unknown`, a row without a visible id gets a positional one, and
//! a missing positions module yields an empty list rather than an error.

use chrono::Utc;
use tracing::{debug, trace};

use bracket_core::{OrderRow, OrderSnapshot, OrderStatus, PositionRow, TradeAction};

use crate::error::{Result, SurfaceError};
use crate::selector::SelectorSet;
use crate::surface::PageSurface;

// Canonical column order of the order table: id, symbol, side, qty, status.
const ORDER_ID_COL: usize = 0;
const ORDER_SYMBOL_COL: usize = 1;
const ORDER_SIDE_COL: usize = 2;
const ORDER_QTY_COL: usize = 3;
const ORDER_STATUS_COL: usize = 4;

// Position table: symbol, signed net quantity.
const POSITION_SYMBOL_COL: usize = 0;
const POSITION_QTY_COL: usize = 1;

/// Read both tables into a snapshot stamped with the read time.
///
/// The order table must be present; its absence means the panel is not in
/// a state where order actions make sense, and that is surfaced as
/// [`SurfaceError::ElementNotFound`].
pub fn scrape_orders(surface: &dyn PageSurface, selectors: &SelectorSet) -> Result<OrderSnapshot> {
    if !surface.exists(&selectors.order_table) {
        return Err(SurfaceError::ElementNotFound {
            selector: selectors.order_table.clone(),
        });
    }

    let orders = surface
        .read_table(&selectors.order_table)?
        .iter()
        .enumerate()
        .filter_map(|(idx, row)| parse_order_row(idx, row))
        .collect::<Vec<_>>();

    let positions = if surface.exists(&selectors.position_table) {
        surface
            .read_table(&selectors.position_table)?
            .iter()
            .filter_map(|row| parse_position_row(row))
            .collect()
    } else {
        trace!(selector = selectors.position_table.as_str(), "position table absent, treating as flat");
        Vec::new()
    };

    debug!(
        orders = orders.len(),
        positions = positions.len(),
        "scraped panel tables"
    );

    Ok(OrderSnapshot {
        orders,
        positions,
        captured_at: Utc::now(),
    })
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("").trim()
}

fn parse_order_row(idx: usize, row: &[String]) -> Option<OrderRow> {
    if row.iter().all(|c| c.trim().is_empty()) {
        return None;
    }

    let id = match cell(row, ORDER_ID_COL) {
        "" => format!("row-{idx}"),
        id => id.to_string(),
    };

    Some(OrderRow {
        id,
        symbol: cell(row, ORDER_SYMBOL_COL).to_string(),
        action: TradeAction::parse_lenient(cell(row, ORDER_SIDE_COL)),
        quantity: cell(row, ORDER_QTY_COL).parse().ok(),
        status: OrderStatus::parse_lenient(cell(row, ORDER_STATUS_COL)),
    })
}

fn parse_position_row(row: &[String]) -> Option<PositionRow> {
    let symbol = cell(row, POSITION_SYMBOL_COL);
    if symbol.is_empty() {
        return None;
    }

    // "+2" and "2" both mean long two contracts.
    let qty_text = cell(row, POSITION_QTY_COL);
    let net_quantity = qty_text
        .strip_prefix('+')
        .unwrap_or(qty_text)
        .parse()
        .unwrap_or(0);

    Some(PositionRow {
        symbol: symbol.to_string(),
        net_quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// Surface backed by literal table data.
    #[derive(Default)]
    struct TablePage {
        tables: Mutex<HashMap<String, Vec<Vec<String>>>>,
    }

    impl TablePage {
        fn with_table(self, selector: &str, rows: &[&[&str]]) -> Self {
            self.tables.lock().insert(
                selector.to_string(),
                rows.iter()
                    .map(|r| r.iter().map(|c| c.to_string()).collect())
                    .collect(),
            );
            self
        }
    }

    impl PageSurface for TablePage {
        fn exists(&self, selector: &str) -> bool {
            self.tables.lock().contains_key(selector)
        }

        fn read_text(&self, _selector: &str) -> Result<String> {
            Ok(String::new())
        }

        fn read_table(&self, selector: &str) -> Result<Vec<Vec<String>>> {
            self.tables
                .lock()
                .get(selector)
                .cloned()
                .ok_or_else(|| SurfaceError::ElementNotFound {
                    selector: selector.to_string(),
                })
        }

        fn set_value(&self, _selector: &str, _value: &str) -> Result<()> {
            Ok(())
        }

        fn click(&self, _selector: &str) -> Result<()> {
            Ok(())
        }
    }

    fn selectors() -> SelectorSet {
        SelectorSet::default()
    }

    #[test]
    fn test_scrape_orders_and_positions() {
        let s = selectors();
        let page = TablePage::default()
            .with_table(
                &s.order_table,
                &[
                    &["101", "NQZ5", "Buy", "1", "Working"],
                    &["102", "NQZ5", "Sell", "1", "Working"],
                ],
            )
            .with_table(&s.position_table, &[&["NQZ5", "+2"], &["ESZ5", "-1"]]);

        let snap = scrape_orders(&page, &s).unwrap();
        assert_eq!(snap.orders.len(), 2);
        assert_eq!(snap.orders[0].id, "101");
        assert_eq!(snap.orders[0].action, Some(TradeAction::Buy));
        assert_eq!(snap.orders[0].quantity, Some(1));
        assert_eq!(snap.orders[0].status, OrderStatus::Working);

        assert_eq!(snap.positions.len(), 2);
        assert_eq!(snap.positions[0].net_quantity, 2);
        assert_eq!(snap.positions[1].net_quantity, -1);
    }

    #[test]
    fn test_lenient_row_parsing() {
        let s = selectors();
        let page = TablePage::default()
            .with_table(
                &s.order_table,
                &[
                    // no id, garbled side, garbled qty, odd status text
                    &["", "NQZ5", "??", "one", "Queued somewhere"],
                    // blank row is dropped entirely
                    &["", "", "", "", ""],
                ],
            )
            .with_table(&s.position_table, &[]);

        let snap = scrape_orders(&page, &s).unwrap();
        assert_eq!(snap.orders.len(), 1);
        assert_eq!(snap.orders[0].id, "row-0");
        assert_eq!(snap.orders[0].action, None);
        assert_eq!(snap.orders[0].quantity, None);
        assert_eq!(snap.orders[0].status, OrderStatus::Unknown);
    }

    #[test]
    fn test_missing_position_table_is_flat() {
        let s = selectors();
        let page = TablePage::default().with_table(&s.order_table, &[]);

        let snap = scrape_orders(&page, &s).unwrap();
        assert!(snap.orders.is_empty());
        assert!(snap.positions.is_empty());
    }

    #[test]
    fn test_missing_order_table_is_an_error() {
        let s = selectors();
        let page = TablePage::default();

        let err = scrape_orders(&page, &s).unwrap_err();
        assert!(matches!(err, SurfaceError::ElementNotFound { .. }));
    }
}
