//! Trade intent: one fully-specified bracket order action.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::order::{OrderType, TradeAction};
use crate::price::Price;

/// One bracket order action, assembled fresh per button click and consumed
/// immediately. Never retained after the action completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeIntent {
    /// Fully-qualified contract symbol (e.g. "NQZ5").
    pub symbol: String,
    /// Buy or sell.
    pub action: TradeAction,
    /// Number of contracts.
    pub quantity: u32,
    /// Entry order type.
    pub order_type: OrderType,
    /// Entry price; `None` for market entries.
    pub entry_price: Option<Price>,
    /// Stop-loss leg price.
    pub stop_loss: Price,
    /// Take-profit leg price.
    pub take_profit: Price,
}

impl TradeIntent {
    /// Check internal consistency before the intent is acted on.
    ///
    /// The panel would reject most of these anyway, but catching them here
    /// produces a clear error instead of an ambiguous on-page failure.
    pub fn validate(&self) -> Result<()> {
        if self.quantity == 0 {
            return Err(CoreError::InvalidQuantity(
                "quantity must be at least 1 contract".into(),
            ));
        }

        if self.order_type.requires_price() && self.entry_price.is_none() {
            return Err(CoreError::MissingEntryPrice(self.order_type.to_string()));
        }

        // The stop sits on the losing side of entry, the target on the
        // winning side. Without an entry price (market order) only the
        // relative ordering of the two legs can be checked.
        match (self.action, self.entry_price) {
            (TradeAction::Buy, Some(entry)) => {
                if self.stop_loss >= entry {
                    return Err(CoreError::InvalidBracket(format!(
                        "buy stop-loss {} must be below entry {}",
                        self.stop_loss, entry
                    )));
                }
                if self.take_profit <= entry {
                    return Err(CoreError::InvalidBracket(format!(
                        "buy take-profit {} must be above entry {}",
                        self.take_profit, entry
                    )));
                }
            }
            (TradeAction::Sell, Some(entry)) => {
                if self.stop_loss <= entry {
                    return Err(CoreError::InvalidBracket(format!(
                        "sell stop-loss {} must be above entry {}",
                        self.stop_loss, entry
                    )));
                }
                if self.take_profit >= entry {
                    return Err(CoreError::InvalidBracket(format!(
                        "sell take-profit {} must be below entry {}",
                        self.take_profit, entry
                    )));
                }
            }
            (TradeAction::Buy, None) => {
                if self.stop_loss >= self.take_profit {
                    return Err(CoreError::InvalidBracket(format!(
                        "buy stop-loss {} must be below take-profit {}",
                        self.stop_loss, self.take_profit
                    )));
                }
            }
            (TradeAction::Sell, None) => {
                if self.stop_loss <= self.take_profit {
                    return Err(CoreError::InvalidBracket(format!(
                        "sell stop-loss {} must be above take-profit {}",
                        self.stop_loss, self.take_profit
                    )));
                }
            }
        }

        Ok(())
    }
}
