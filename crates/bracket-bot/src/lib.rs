//! Bracket order automation demo application.
//!
//! Wires the library crates into a runnable whole: configuration,
//! logging, the persisted settings store, and an [`sim::SimulatedPanel`]
//! standing in for the live trading page. A real page backend would
//! implement `PageSurface` elsewhere and slot in the same way.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod sim;

pub use app::Application;
pub use config::{AppConfig, PollConfig};
pub use error::{AppError, AppResult};
pub use logging::init_logging;
pub use sim::SimulatedPanel;
