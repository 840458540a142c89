//! Capability boundary between order flows and the trading panel page.
//!
//! The host page is owned by a third party: its markup re-renders out of
//! band and its class names change without notice. Everything above this
//! crate therefore talks to the page through the [`PageSurface`] trait and
//! re-queries by selector on every access instead of holding element
//! handles across awaits.

pub mod actions;
pub mod error;
pub mod scrape;
pub mod selector;
pub mod surface;
pub mod validator;
pub mod wait;

pub use actions::click_with_fallback;
pub use error::{Result, SurfaceError};
pub use scrape::scrape_orders;
pub use selector::SelectorSet;
pub use surface::PageSurface;
pub use validator::{ElementValidator, NoopValidator};
pub use wait::wait_for_element;
