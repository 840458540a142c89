//! Typed view over the stored trade defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::{keys, SettingsStore};

/// The trade defaults the panel pre-fills from.
///
/// Stored values are plain strings typed in by a user; parsing is lenient
/// and anything missing or garbled falls back to the hardcoded default
/// rather than failing a trade action over a bad saved preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeDefaults {
    pub symbol: String,
    pub quantity: u32,
    pub stop_loss_ticks: u32,
    pub take_profit_ticks: u32,
    pub tick_size: Decimal,
}

impl Default for TradeDefaults {
    fn default() -> Self {
        Self {
            symbol: "NQ".to_string(),
            quantity: 1,
            stop_loss_ticks: 40,
            take_profit_ticks: 53,
            tick_size: Decimal::new(25, 2), // 0.25
        }
    }
}

impl TradeDefaults {
    /// Read defaults out of a store, falling back field by field.
    pub fn load(store: &SettingsStore) -> Self {
        let fallback = Self::default();

        Self {
            symbol: store.get(keys::SYMBOL).unwrap_or(fallback.symbol),
            quantity: parse_or(store.get(keys::QUANTITY), fallback.quantity),
            stop_loss_ticks: parse_or(store.get(keys::STOP_LOSS_TICKS), fallback.stop_loss_ticks),
            take_profit_ticks: parse_or(
                store.get(keys::TAKE_PROFIT_TICKS),
                fallback.take_profit_ticks,
            ),
            tick_size: parse_or(store.get(keys::TICK_SIZE), fallback.tick_size),
        }
    }

    /// Write every field back to the store.
    pub fn save(&self, store: &SettingsStore) -> Result<()> {
        store.set(keys::SYMBOL, &self.symbol)?;
        store.set(keys::QUANTITY, &self.quantity.to_string())?;
        store.set(keys::STOP_LOSS_TICKS, &self.stop_loss_ticks.to_string())?;
        store.set(keys::TAKE_PROFIT_TICKS, &self.take_profit_ticks.to_string())?;
        store.set(keys::TICK_SIZE, &self.tick_size.to_string())?;
        Ok(())
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, fallback: T) -> T {
    value
        .as_deref()
        .map(str::trim)
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_empty_store_gives_fallbacks() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::open(dir.path().join("s.json")).unwrap();

        let defaults = TradeDefaults::load(&store);
        assert_eq!(defaults, TradeDefaults::default());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::open(dir.path().join("s.json")).unwrap();

        let defaults = TradeDefaults {
            symbol: "MNQ".into(),
            quantity: 3,
            stop_loss_ticks: 30,
            take_profit_ticks: 60,
            tick_size: dec!(0.25),
        };
        defaults.save(&store).unwrap();

        assert_eq!(TradeDefaults::load(&store), defaults);
    }

    #[test]
    fn test_garbled_value_falls_back_per_field() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::open(dir.path().join("s.json")).unwrap();

        store.set(keys::QUANTITY, "two").unwrap();
        store.set(keys::STOP_LOSS_TICKS, " 25 ").unwrap();
        store.set(keys::SYMBOL, "GC").unwrap();

        let defaults = TradeDefaults::load(&store);
        assert_eq!(defaults.quantity, TradeDefaults::default().quantity);
        assert_eq!(defaults.stop_loss_ticks, 25);
        assert_eq!(defaults.symbol, "GC");
    }
}
