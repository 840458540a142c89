//! Precision-safe price type.
//!
//! Uses `rust_decimal` for exact decimal arithmetic. Futures prices move in
//! fixed tick increments, so float rounding errors would silently produce
//! prices the trading panel rejects.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Price with exact decimal precision.
///
/// Wraps `Decimal` to keep prices from being mixed with plain numeric
/// values (tick counts, quantities) in calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Round to the nearest tick.
    ///
    /// A zero tick size returns the price unchanged.
    #[inline]
    pub fn round_to_tick(&self, tick_size: Decimal) -> Self {
        if tick_size.is_zero() {
            return *self;
        }
        Self((self.0 / tick_size).round() * tick_size)
    }

    /// Displace by a signed number of ticks.
    ///
    /// Negative `ticks` moves the price down. Used for stop-loss and
    /// take-profit placement relative to an entry price.
    #[inline]
    pub fn offset_ticks(&self, ticks: i64, tick_size: Decimal) -> Self {
        Self(self.0 + Decimal::from(ticks) * tick_size)
    }

    /// Round to a fixed number of decimal places.
    #[inline]
    pub fn round_dp(&self, decimals: u32) -> Self {
        Self(self.0.round_dp(decimals))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Price {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_to_tick() {
        let price = Price::new(dec!(18251.13));
        let rounded = price.round_to_tick(dec!(0.25));
        assert_eq!(rounded.inner(), dec!(18251.25));

        let price = Price::new(dec!(18251.10));
        let rounded = price.round_to_tick(dec!(0.25));
        assert_eq!(rounded.inner(), dec!(18251.00));
    }

    #[test]
    fn test_round_to_zero_tick_is_identity() {
        let price = Price::new(dec!(42.42));
        assert_eq!(price.round_to_tick(dec!(0)), price);
    }

    #[test]
    fn test_offset_ticks() {
        let entry = Price::new(dec!(18250.00));

        // 40 ticks of 0.25 below = 10 points
        let stop = entry.offset_ticks(-40, dec!(0.25));
        assert_eq!(stop.inner(), dec!(18240.00));

        let target = entry.offset_ticks(53, dec!(0.25));
        assert_eq!(target.inner(), dec!(18263.25));
    }

    #[test]
    fn test_parse_and_display() {
        let price: Price = "2045.7".parse().unwrap();
        assert_eq!(price.inner(), dec!(2045.7));
        assert_eq!(price.to_string(), "2045.7");
    }
}
