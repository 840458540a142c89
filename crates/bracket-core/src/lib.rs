//! Core domain types for the bracket order automation toolkit.
//!
//! This crate provides the vocabulary shared by every other crate:
//! - `Price`: precision-safe price type
//! - `TradeAction`, `OrderType`, `OrderStatus`: trading enums
//! - `TradeIntent`: one fully-specified bracket order action
//! - `OrderSnapshot`: a point-in-time reading of the visible order and
//!   position tables, used for before/after comparison

pub mod error;
pub mod intent;
pub mod order;
pub mod price;
pub mod snapshot;

pub use error::{CoreError, Result};
pub use intent::TradeIntent;
pub use order::{ActionId, OrderStatus, OrderType, TradeAction};
pub use price::Price;
pub use snapshot::{OrderRow, OrderSnapshot, PositionRow};
