//! Order-related types and identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Trade direction: buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    /// Returns the opposite direction.
    ///
    /// A position opened with a buy is closed with a sell, and the
    /// stop/target legs of a bracket sit on the opposite side of entry.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    /// Returns 1 for buy, -1 for sell (for signed position math).
    pub fn sign(&self) -> i8 {
        match self {
            Self::Buy => 1,
            Self::Sell => -1,
        }
    }

    /// Parse rendered table text into an action.
    ///
    /// Order tables render the side as free text ("Buy", "SELL", "B").
    /// Returns `None` for unrecognized text.
    pub fn parse_lenient(text: &str) -> Option<Self> {
        let t = text.trim().to_ascii_lowercase();
        match t.as_str() {
            "buy" | "b" | "long" => Some(Self::Buy),
            "sell" | "s" | "short" => Some(Self::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "Buy"),
            Self::Sell => write!(f, "Sell"),
        }
    }
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Market order (the default for one-click entries).
    #[default]
    Market,
    /// Limit order.
    Limit,
    /// Stop-market order.
    Stop,
    /// Stop-limit order.
    StopLimit,
}

impl OrderType {
    /// Whether this type needs an explicit entry price.
    pub fn requires_price(&self) -> bool {
        !matches!(self, Self::Market)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Market => write!(f, "MARKET"),
            Self::Limit => write!(f, "LIMIT"),
            Self::Stop => write!(f, "STOP"),
            Self::StopLimit => write!(f, "STOP LIMIT"),
        }
    }
}

/// Order status as read off the rendered order table.
///
/// The table cell is free text owned by the host application, so parsing
/// is lenient and anything unrecognized maps to `Unknown` rather than an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Order is live at the exchange.
    Working,
    /// Order completely filled.
    Filled,
    /// Order cancelled.
    Cancelled,
    /// Order rejected.
    Rejected,
    /// Status text not recognized.
    #[default]
    Unknown,
}

impl OrderStatus {
    /// Returns true if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Filled | Self::Cancelled | Self::Rejected)
    }

    /// Returns true if the order is still live (can be cancelled).
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Working)
    }

    /// Parse rendered status text.
    ///
    /// Substring match, case-insensitive; accepts both "canceled" and
    /// "cancelled" spellings.
    pub fn parse_lenient(text: &str) -> Self {
        let t = text.trim().to_ascii_lowercase();
        if t.contains("working") || t.contains("accepted") || t.contains("pending") {
            Self::Working
        } else if t.contains("filled") {
            Self::Filled
        } else if t.contains("cancel") {
            Self::Cancelled
        } else if t.contains("reject") {
            Self::Rejected
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Working => write!(f, "Working"),
            Self::Filled => write!(f, "Filled"),
            Self::Cancelled => write!(f, "Cancelled"),
            Self::Rejected => write!(f, "Rejected"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Identifier for one user-visible trade action.
///
/// Every button click (place, cancel-all, flatten) gets a fresh id so the
/// log lines of one action can be correlated across the retry attempts it
/// spawns. Format: `brkt_{timestamp_ms}_{uuid_short}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(String);

impl ActionId {
    /// Create a new unique action id.
    pub fn new() -> Self {
        let ts = chrono::Utc::now().timestamp_millis();
        let uuid_short = &Uuid::new_v4().to_string()[..8];
        Self(format!("brkt_{ts}_{uuid_short}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
