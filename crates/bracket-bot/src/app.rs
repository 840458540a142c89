//! Application wiring.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use bracket_contracts::builtin_registry;
use bracket_core::{OrderSnapshot, OrderType, Price, TradeAction};
use bracket_exec::{build_bracket_intent, ActionReport, OrderFlow};
use bracket_settings::{SettingsStore, TradeDefaults};
use bracket_surface::NoopValidator;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::sim::SimulatedPanel;

/// The assembled application: config, persisted defaults, and an order
/// flow bound to the simulated panel.
pub struct Application {
    config: AppConfig,
    settings: SettingsStore,
    flow: OrderFlow,
}

impl Application {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let settings = SettingsStore::open(&config.settings_path)?;
        let panel = Arc::new(SimulatedPanel::new(config.selectors.clone(), config.sim));
        let flow = OrderFlow::new(
            panel,
            Arc::new(NoopValidator),
            config.selectors.clone(),
            config.element_wait.policy(),
            config.confirm_poll.policy(),
        );

        Ok(Self {
            config,
            settings,
            flow,
        })
    }

    /// Stored trade defaults, with fallbacks for anything unset.
    pub fn defaults(&self) -> TradeDefaults {
        TradeDefaults::load(&self.settings)
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Place one bracket order.
    ///
    /// CLI arguments win over stored defaults, which win over the config
    /// file. An explicit entry price makes the entry a limit order;
    /// without one the entry is a market order anchored on the panel's
    /// last traded price. The traded symbol and quantity are written back
    /// as the new stored defaults, the way the panel remembered the last
    /// trade.
    pub async fn place(
        &self,
        action: TradeAction,
        symbol: Option<String>,
        quantity: Option<u32>,
        entry: Option<Price>,
    ) -> AppResult<ActionReport> {
        let defaults = self.defaults();
        let raw_symbol = symbol.unwrap_or_else(|| defaults.symbol.clone());
        let quantity = quantity.unwrap_or(defaults.quantity);
        let order_type = if entry.is_some() {
            OrderType::Limit
        } else {
            OrderType::Market
        };
        let reference = match entry {
            Some(price) => price,
            None => self.flow.last_price()?,
        };

        let intent = build_bracket_intent(
            &raw_symbol,
            action,
            quantity,
            order_type,
            entry,
            reference,
            self.config.stop_loss_ticks.or(Some(defaults.stop_loss_ticks)),
            self.config
                .take_profit_ticks
                .or(Some(defaults.take_profit_ticks)),
            builtin_registry(),
            Utc::now(),
        )?;

        let report = self.flow.place_bracket(&intent).await?;

        let mut updated = defaults;
        updated.symbol = raw_symbol;
        updated.quantity = quantity;
        updated.save(&self.settings)?;
        info!(symbol = updated.symbol.as_str(), qty = updated.quantity, "stored defaults updated");

        Ok(report)
    }

    /// Cancel every working order.
    pub async fn cancel_all(&self) -> AppResult<ActionReport> {
        Ok(self.flow.cancel_all().await?)
    }

    /// Exit every open position at market.
    pub async fn flatten_all(&self) -> AppResult<ActionReport> {
        Ok(self.flow.flatten_all().await?)
    }

    /// Current reading of the panel tables.
    pub fn snapshot(&self) -> AppResult<OrderSnapshot> {
        Ok(self.flow.snapshot()?)
    }
}
