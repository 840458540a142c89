//! Bracket leg computation and intent assembly.

use chrono::{DateTime, Utc};

use bracket_contracts::{normalize_symbol_at, TickRegistry};
use bracket_core::{OrderType, Price, TradeAction, TradeIntent};

use crate::error::{ExecError, Result};

/// Stop-loss and take-profit prices for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketPrices {
    pub stop_loss: Price,
    pub take_profit: Price,
}

/// Place the protective legs around an entry price.
///
/// For a buy the stop sits `stop_ticks` below entry and the target
/// `target_ticks` above; a sell mirrors both. Legs are snapped to the
/// product's tick grid and display precision.
pub fn bracket_prices(
    entry: Price,
    action: TradeAction,
    tick_size: rust_decimal::Decimal,
    price_decimals: u32,
    stop_ticks: u32,
    target_ticks: u32,
) -> BracketPrices {
    let dir = i64::from(action.sign());
    let stop_loss = entry
        .offset_ticks(-dir * i64::from(stop_ticks), tick_size)
        .round_to_tick(tick_size)
        .round_dp(price_decimals);
    let take_profit = entry
        .offset_ticks(dir * i64::from(target_ticks), tick_size)
        .round_to_tick(tick_size)
        .round_dp(price_decimals);
    BracketPrices {
        stop_loss,
        take_profit,
    }
}

/// Assemble a validated [`TradeIntent`] for one bracket action.
///
/// The symbol is re-normalized against the roll calendar at `at`, the
/// product's tick spec is looked up (falling back for unknown roots), and
/// missing tick distances come from the product's defaults. `reference_price`
/// anchors the legs when the entry is a market order; limit/stop entries
/// anchor on their own price.
#[allow(clippy::too_many_arguments)]
pub fn build_bracket_intent(
    raw_symbol: &str,
    action: TradeAction,
    quantity: u32,
    order_type: OrderType,
    entry_price: Option<Price>,
    reference_price: Price,
    stop_ticks: Option<u32>,
    target_ticks: Option<u32>,
    registry: &TickRegistry,
    at: DateTime<Utc>,
) -> Result<TradeIntent> {
    let symbol = normalize_symbol_at(raw_symbol, at);
    let spec = registry.spec_for(&symbol);

    let stop_ticks = stop_ticks.unwrap_or(spec.default_stop_ticks);
    let target_ticks = target_ticks.unwrap_or(spec.default_target_ticks);

    let anchor = entry_price.unwrap_or(reference_price);
    let legs = bracket_prices(
        anchor,
        action,
        spec.tick_size,
        spec.price_decimals,
        stop_ticks,
        target_ticks,
    );

    let intent = TradeIntent {
        symbol,
        action,
        quantity,
        order_type,
        entry_price,
        stop_loss: legs.stop_loss,
        take_profit: legs.take_profit,
    };
    intent.validate()?;
    Ok(intent)
}

/// Parse a price out of rendered quote text.
///
/// Quote cells render with thousands separators and the occasional
/// currency sign; anything left unparseable is the caller's error.
pub fn parse_price_text(text: &str) -> Result<Price> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | ' '))
        .collect();
    cleaned
        .parse()
        .map_err(|_| ExecError::UnreadablePrice(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bracket_contracts::builtin_registry;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_buy_legs() {
        let legs = bracket_prices(
            Price::new(dec!(18250.00)),
            TradeAction::Buy,
            dec!(0.25),
            2,
            40,
            53,
        );
        assert_eq!(legs.stop_loss.inner(), dec!(18240.00));
        assert_eq!(legs.take_profit.inner(), dec!(18263.25));
    }

    #[test]
    fn test_sell_legs_mirrored() {
        let legs = bracket_prices(
            Price::new(dec!(18250.00)),
            TradeAction::Sell,
            dec!(0.25),
            2,
            40,
            53,
        );
        assert_eq!(legs.stop_loss.inner(), dec!(18260.00));
        assert_eq!(legs.take_profit.inner(), dec!(18236.75));
    }

    #[test]
    fn test_legs_snap_to_tick() {
        // Off-grid anchor gets snapped before display rounding
        let legs = bracket_prices(
            Price::new(dec!(18250.10)),
            TradeAction::Buy,
            dec!(0.25),
            2,
            4,
            8,
        );
        assert_eq!(legs.stop_loss.inner(), dec!(18249.00));
        assert_eq!(legs.take_profit.inner(), dec!(18252.00));
    }

    #[test]
    fn test_build_intent_expands_root_and_uses_defaults() {
        let intent = build_bracket_intent(
            "NQ",
            TradeAction::Buy,
            2,
            OrderType::Market,
            None,
            Price::new(dec!(18250.00)),
            None,
            None,
            builtin_registry(),
            at(),
        )
        .unwrap();

        // October 2025: December contract
        assert_eq!(intent.symbol, "NQZ5");
        assert_eq!(intent.quantity, 2);
        // NQ defaults: 40 tick stop, 53 tick target
        assert_eq!(intent.stop_loss.inner(), dec!(18240.00));
        assert_eq!(intent.take_profit.inner(), dec!(18263.25));
    }

    #[test]
    fn test_build_intent_explicit_ticks_override_defaults() {
        let intent = build_bracket_intent(
            "ESZ5",
            TradeAction::Sell,
            1,
            OrderType::Limit,
            Some(Price::new(dec!(5900.00))),
            Price::new(dec!(5899.00)),
            Some(8),
            Some(12),
            builtin_registry(),
            at(),
        )
        .unwrap();

        assert_eq!(intent.symbol, "ESZ5");
        // Limit entry anchors on its own price, not the reference
        assert_eq!(intent.stop_loss.inner(), dec!(5902.00));
        assert_eq!(intent.take_profit.inner(), dec!(5897.00));
    }

    #[test]
    fn test_build_intent_rejects_zero_quantity() {
        let err = build_bracket_intent(
            "NQ",
            TradeAction::Buy,
            0,
            OrderType::Market,
            None,
            Price::new(dec!(18250.00)),
            None,
            None,
            builtin_registry(),
            at(),
        )
        .unwrap_err();
        assert!(matches!(err, ExecError::InvalidIntent(_)));
    }

    #[test]
    fn test_parse_price_text() {
        assert_eq!(parse_price_text("18,251.25").unwrap().inner(), dec!(18251.25));
        assert_eq!(parse_price_text(" $68.07 ").unwrap().inner(), dec!(68.07));
        assert!(parse_price_text("--").is_err());
    }
}
