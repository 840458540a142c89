//! Futures contract codes, quarterly roll resolution, and tick specs.
//!
//! This crate answers two questions the order flows ask constantly:
//! - "NQ" was typed into the symbol box: which dated contract is that
//!   right now? (`roll`, `symbol`)
//! - what are this product's tick size, tick value, and default bracket
//!   distances? (`ticks`)

pub mod error;
pub mod month_code;
pub mod roll;
pub mod symbol;
pub mod ticks;

pub use error::{ContractError, Result};
pub use month_code::{ContractCode, MonthCode};
pub use roll::{
    active_quarterly_at, active_quarterly_now, monthly_code_at, monthly_code_now,
    third_friday_utc,
};
pub use symbol::{normalize_symbol, normalize_symbol_at, split_qualified, RootSymbol};
pub use ticks::{builtin_registry, TickRegistry, TickSpec};
