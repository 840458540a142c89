//! Per-product tick specifications.
//!
//! Immutable reference data: minimum price increment, its dollar value,
//! default bracket distances, and display precision. The registry is an
//! injected map rather than an ambient global so every consumer sees the
//! same table; `builtin_registry()` carries the standard CME products.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::symbol::split_qualified;

/// Tick data for one product root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSpec {
    /// Minimum price increment.
    pub tick_size: Decimal,
    /// Dollar value of one tick per contract.
    pub tick_value: Decimal,
    /// Default stop-loss distance in ticks.
    pub default_stop_ticks: u32,
    /// Default take-profit distance in ticks.
    pub default_target_ticks: u32,
    /// Decimal places the panel renders prices with.
    pub price_decimals: u32,
}

impl TickSpec {
    /// Dollar risk of `ticks` ticks on `quantity` contracts.
    pub fn dollar_risk(&self, ticks: u32, quantity: u32) -> Decimal {
        self.tick_value * Decimal::from(ticks) * Decimal::from(quantity)
    }
}

impl Default for TickSpec {
    fn default() -> Self {
        // Index-future-shaped fallback for products missing from the table.
        Self {
            tick_size: dec!(0.25),
            tick_value: dec!(5.00),
            default_stop_ticks: 40,
            default_target_ticks: 53,
            price_decimals: 2,
        }
    }
}

/// Immutable root -> spec lookup with a fallback for unknown products.
#[derive(Debug, Clone)]
pub struct TickRegistry {
    specs: HashMap<String, TickSpec>,
    fallback: TickSpec,
}

impl TickRegistry {
    pub fn new(specs: HashMap<String, TickSpec>, fallback: TickSpec) -> Self {
        Self { specs, fallback }
    }

    /// Spec for a bare root, if the product is known.
    pub fn get(&self, root: &str) -> Option<&TickSpec> {
        self.specs.get(root)
    }

    /// Spec for either a bare root or a dated symbol.
    ///
    /// "NQ" and "NQZ5" resolve to the same entry; unknown products get the
    /// fallback spec rather than an error, matching how the panel treats
    /// instruments it has no tick data for.
    pub fn spec_for(&self, symbol: &str) -> &TickSpec {
        if let Some(spec) = self.specs.get(symbol) {
            return spec;
        }
        if let Some((root, _)) = split_qualified(symbol) {
            if let Some(spec) = self.specs.get(root) {
                return spec;
            }
        }
        &self.fallback
    }

    pub fn contains(&self, root: &str) -> bool {
        self.specs.contains_key(root)
    }

    /// Known product roots.
    pub fn roots(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }
}

impl Default for TickRegistry {
    fn default() -> Self {
        builtin_registry().clone()
    }
}

fn spec(
    tick_size: Decimal,
    tick_value: Decimal,
    default_stop_ticks: u32,
    default_target_ticks: u32,
    price_decimals: u32,
) -> TickSpec {
    TickSpec {
        tick_size,
        tick_value,
        default_stop_ticks,
        default_target_ticks,
        price_decimals,
    }
}

static BUILTIN: Lazy<TickRegistry> = Lazy::new(|| {
    let mut specs = HashMap::new();

    // Equity index
    specs.insert("NQ".into(), spec(dec!(0.25), dec!(5.00), 40, 53, 2));
    specs.insert("MNQ".into(), spec(dec!(0.25), dec!(0.50), 40, 53, 2));
    specs.insert("ES".into(), spec(dec!(0.25), dec!(12.50), 16, 21, 2));
    specs.insert("MES".into(), spec(dec!(0.25), dec!(1.25), 16, 21, 2));
    specs.insert("RTY".into(), spec(dec!(0.1), dec!(5.00), 30, 40, 1));
    specs.insert("M2K".into(), spec(dec!(0.1), dec!(0.50), 30, 40, 1));
    specs.insert("YM".into(), spec(dec!(1), dec!(5.00), 50, 65, 0));
    specs.insert("MYM".into(), spec(dec!(1), dec!(0.50), 50, 65, 0));

    // Energy
    specs.insert("CL".into(), spec(dec!(0.01), dec!(10.00), 20, 30, 2));
    specs.insert("MCL".into(), spec(dec!(0.01), dec!(1.00), 20, 30, 2));

    // Metals
    specs.insert("GC".into(), spec(dec!(0.1), dec!(10.00), 30, 40, 1));
    specs.insert("MGC".into(), spec(dec!(0.1), dec!(1.00), 30, 40, 1));
    specs.insert("SI".into(), spec(dec!(0.005), dec!(25.00), 40, 60, 3));

    TickRegistry::new(specs, TickSpec::default())
});

/// The standard product table.
pub fn builtin_registry() -> &'static TickRegistry {
    &BUILTIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup_by_root() {
        let reg = builtin_registry();
        let nq = reg.get("NQ").unwrap();
        assert_eq!(nq.tick_size, dec!(0.25));
        assert_eq!(nq.tick_value, dec!(5.00));
    }

    #[test]
    fn test_spec_for_dated_symbol() {
        let reg = builtin_registry();
        assert_eq!(reg.spec_for("NQZ5"), reg.get("NQ").unwrap());
        assert_eq!(reg.spec_for("MNQU5"), reg.get("MNQ").unwrap());
    }

    #[test]
    fn test_unknown_product_gets_fallback() {
        let reg = builtin_registry();
        let spec = reg.spec_for("ZB");
        assert_eq!(spec, &TickSpec::default());
        assert!(!reg.contains("ZB"));
    }

    #[test]
    fn test_micro_contracts_share_tick_size() {
        let reg = builtin_registry();
        assert_eq!(
            reg.get("NQ").unwrap().tick_size,
            reg.get("MNQ").unwrap().tick_size
        );
        assert_ne!(
            reg.get("NQ").unwrap().tick_value,
            reg.get("MNQ").unwrap().tick_value
        );
    }

    #[test]
    fn test_dollar_risk() {
        let reg = builtin_registry();
        let nq = reg.get("NQ").unwrap();
        // 40 ticks x $5 x 2 contracts
        assert_eq!(nq.dollar_risk(40, 2), dec!(400.00));
    }

    #[test]
    fn test_injected_registry_overrides() {
        let mut specs = HashMap::new();
        specs.insert("NQ".into(), spec(dec!(0.25), dec!(5.00), 10, 20, 2));
        let reg = TickRegistry::new(specs, TickSpec::default());

        assert_eq!(reg.spec_for("NQ").default_stop_ticks, 10);
        assert_eq!(reg.spec_for("ES"), &TickSpec::default());
    }
}
