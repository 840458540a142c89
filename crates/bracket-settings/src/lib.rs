//! Persisted per-user trade defaults.
//!
//! The panel remembers what the user last traded with: symbol, quantity,
//! bracket distances, tick size. Stored as a flat string key/value map in
//! one JSON file, loaded on open and written through on every change, the
//! same schema the browser-local storage used.

pub mod defaults;
pub mod error;
pub mod store;

pub use defaults::TradeDefaults;
pub use error::{Result, SettingsError};
pub use store::{keys, SettingsStore};
