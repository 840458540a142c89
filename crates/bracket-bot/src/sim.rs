//! In-memory trading panel simulator.
//!
//! Implements [`PageSurface`] over a small state machine so the order
//! flows can be driven end to end without a browser: inputs hold values,
//! the submit click materializes an order row (and a fill for market
//! entries), cancel-all and exit clicks clear the respective tables. A
//! click's effect becomes visible only after a configurable number of
//! order-table reads, which is what a repainting page looks like to the
//! polling layer.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::debug;

use bracket_core::TradeAction;
use bracket_surface::{PageSurface, Result, SelectorSet, SurfaceError};

use crate::config::SimConfig;

#[derive(Debug, Clone)]
struct SimOrder {
    id: u32,
    symbol: String,
    side: TradeAction,
    quantity: u32,
    status: &'static str,
}

#[derive(Debug)]
enum PendingEffect {
    /// New order row; `position_delta` is set for market entries that
    /// fill immediately.
    Place {
        order: SimOrder,
        position_delta: Option<(String, i64)>,
    },
    ClearOrders,
    Flatten,
}

#[derive(Debug)]
struct PanelState {
    inputs: BTreeMap<String, String>,
    side: Option<TradeAction>,
    orders: Vec<SimOrder>,
    positions: BTreeMap<String, i64>,
    next_order_id: u32,
    settle_reads: u32,
    pending: Option<PendingEffect>,
}

/// Simulated trading panel.
pub struct SimulatedPanel {
    selectors: SelectorSet,
    settle_delay: u32,
    last_price: Decimal,
    state: Mutex<PanelState>,
}

impl SimulatedPanel {
    pub fn new(selectors: SelectorSet, sim: SimConfig) -> Self {
        Self {
            selectors,
            settle_delay: sim.settle_reads,
            last_price: sim.last_price,
            state: Mutex::new(PanelState {
                inputs: BTreeMap::new(),
                side: None,
                orders: Vec::new(),
                positions: BTreeMap::new(),
                next_order_id: 100,
                settle_reads: 0,
                pending: None,
            }),
        }
    }

    fn is_known_selector(&self, selector: &str) -> bool {
        let s = &self.selectors;
        selector == s.symbol_input
            || selector == s.quantity_input
            || selector == s.price_input
            || selector == s.order_table
            || selector == s.position_table
            || selector == s.last_price
            || s.buy_buttons.iter().any(|b| b == selector)
            || s.sell_buttons.iter().any(|b| b == selector)
            || s.submit_buttons.iter().any(|b| b == selector)
            || s.cancel_all_buttons.iter().any(|b| b == selector)
            || s.exit_all_buttons.iter().any(|b| b == selector)
    }

    fn submit(&self, state: &mut PanelState) {
        let symbol = state
            .inputs
            .get(&self.selectors.symbol_input)
            .cloned()
            .unwrap_or_default();
        let quantity: u32 = state
            .inputs
            .get(&self.selectors.quantity_input)
            .and_then(|q| q.parse().ok())
            .unwrap_or(1);
        let side = state.side.unwrap_or(TradeAction::Buy);
        let is_market = state
            .inputs
            .get(&self.selectors.price_input)
            .map(|p| p.is_empty())
            .unwrap_or(true);

        state.next_order_id += 1;
        let order = SimOrder {
            id: state.next_order_id,
            symbol: symbol.clone(),
            side,
            quantity,
            status: if is_market { "Filled" } else { "Working" },
        };

        let position_delta = is_market
            .then(|| (symbol.clone(), i64::from(side.sign()) * i64::from(quantity)));

        debug!(
            id = order.id,
            symbol = symbol.as_str(),
            market = is_market,
            "sim: order submitted"
        );
        state.pending = Some(PendingEffect::Place {
            order,
            position_delta,
        });
        state.settle_reads = self.settle_delay;
        // Entry price does not carry over to the next ticket
        state.inputs.remove(&self.selectors.price_input);
    }

    fn tick_settle(state: &mut PanelState) {
        if state.pending.is_none() {
            return;
        }
        if state.settle_reads > 0 {
            state.settle_reads -= 1;
            return;
        }
        match state.pending.take() {
            Some(PendingEffect::Place {
                order,
                position_delta,
            }) => {
                if let Some((symbol, delta)) = position_delta {
                    *state.positions.entry(symbol).or_insert(0) += delta;
                }
                state.orders.push(order);
            }
            Some(PendingEffect::ClearOrders) => state.orders.clear(),
            Some(PendingEffect::Flatten) => {
                state.positions.clear();
                state.orders.clear();
            }
            None => {}
        }
    }
}

impl PageSurface for SimulatedPanel {
    fn exists(&self, selector: &str) -> bool {
        self.is_known_selector(selector)
    }

    fn read_text(&self, selector: &str) -> Result<String> {
        if selector == self.selectors.last_price {
            return Ok(self.last_price.to_string());
        }
        if let Some(value) = self.state.lock().inputs.get(selector) {
            return Ok(value.clone());
        }
        Err(SurfaceError::ElementNotFound {
            selector: selector.to_string(),
        })
    }

    fn read_table(&self, selector: &str) -> Result<Vec<Vec<String>>> {
        let mut state = self.state.lock();

        if selector == self.selectors.order_table {
            Self::tick_settle(&mut state);
            return Ok(state
                .orders
                .iter()
                .map(|o| {
                    vec![
                        o.id.to_string(),
                        o.symbol.clone(),
                        o.side.to_string(),
                        o.quantity.to_string(),
                        o.status.to_string(),
                    ]
                })
                .collect());
        }

        if selector == self.selectors.position_table {
            return Ok(state
                .positions
                .iter()
                .map(|(symbol, net)| vec![symbol.clone(), net.to_string()])
                .collect());
        }

        Err(SurfaceError::ElementNotFound {
            selector: selector.to_string(),
        })
    }

    fn set_value(&self, selector: &str, value: &str) -> Result<()> {
        if !self.is_known_selector(selector) {
            return Err(SurfaceError::ElementNotFound {
                selector: selector.to_string(),
            });
        }
        self.state
            .lock()
            .inputs
            .insert(selector.to_string(), value.to_string());
        Ok(())
    }

    fn click(&self, selector: &str) -> Result<()> {
        let s = &self.selectors;
        let mut state = self.state.lock();

        if s.buy_buttons.iter().any(|b| b == selector) {
            state.side = Some(TradeAction::Buy);
        } else if s.sell_buttons.iter().any(|b| b == selector) {
            state.side = Some(TradeAction::Sell);
        } else if s.submit_buttons.iter().any(|b| b == selector) {
            self.submit(&mut state);
        } else if s.cancel_all_buttons.iter().any(|b| b == selector) {
            state.pending = Some(PendingEffect::ClearOrders);
            state.settle_reads = self.settle_delay;
        } else if s.exit_all_buttons.iter().any(|b| b == selector) {
            state.pending = Some(PendingEffect::Flatten);
            state.settle_reads = self.settle_delay;
        } else {
            return Err(SurfaceError::ElementNotFound {
                selector: selector.to_string(),
            });
        }
        Ok(())
    }
}
