//! Selector tables for the trading panel.
//!
//! The class names below belong to the host application and change
//! without notice, which is why every action button carries an ordered
//! fallback list: candidates are tried in sequence until one matches.
//! The whole set is overridable from configuration.

use serde::{Deserialize, Serialize};

/// CSS selectors for every panel element the order flows touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorSet {
    /// Symbol search input on the order ticket.
    pub symbol_input: String,
    /// Quantity input.
    pub quantity_input: String,
    /// Entry price input (limit/stop tickets only).
    pub price_input: String,
    /// Buy-side selector buttons, tried in order.
    pub buy_buttons: Vec<String>,
    /// Sell-side selector buttons, tried in order.
    pub sell_buttons: Vec<String>,
    /// Submit buttons, tried in order.
    pub submit_buttons: Vec<String>,
    /// Cancel-all-orders buttons, tried in order.
    pub cancel_all_buttons: Vec<String>,
    /// Exit-at-market (flatten) buttons, tried in order.
    pub exit_all_buttons: Vec<String>,
    /// Working orders table.
    pub order_table: String,
    /// Positions table.
    pub position_table: String,
    /// Last traded price cell, used as the reference for market-order
    /// bracket legs.
    pub last_price: String,
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self {
            symbol_input: ".search-box--input".into(),
            quantity_input: ".select-input.combobox input".into(),
            price_input: ".numeric-input.feedback-wrapper input".into(),
            buy_buttons: vec![
                ".btn-group .btn-success".into(),
                "button[data-action=\"buy\"]".into(),
            ],
            sell_buttons: vec![
                ".btn-group .btn-danger".into(),
                "button[data-action=\"sell\"]".into(),
            ],
            submit_buttons: vec![
                ".btn-group .btn-primary".into(),
                "button[type=\"submit\"]".into(),
            ],
            cancel_all_buttons: vec![
                ".cancel-all-btn".into(),
                "button[title=\"Cancel All\"]".into(),
            ],
            exit_all_buttons: vec![
                ".exit-at-market-btn".into(),
                "button[title=\"Exit at Mkt & Cxl\"]".into(),
            ],
            order_table: ".module.orders .data-table".into(),
            position_table: ".module.positions .data-table".into(),
            last_price: ".quote .last-price".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_fallbacks_for_every_action() {
        let s = SelectorSet::default();
        assert!(s.buy_buttons.len() >= 2);
        assert!(s.sell_buttons.len() >= 2);
        assert!(s.submit_buttons.len() >= 2);
        assert!(s.cancel_all_buttons.len() >= 2);
        assert!(s.exit_all_buttons.len() >= 2);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let parsed: SelectorSet =
            serde_json::from_str(r#"{"order_table": ".custom-orders"}"#).unwrap();
        assert_eq!(parsed.order_table, ".custom-orders");
        assert_eq!(parsed.position_table, SelectorSet::default().position_table);
    }
}
