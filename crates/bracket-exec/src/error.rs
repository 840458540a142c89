//! Execution error types.
//!
//! "The element never appeared", "we gave up waiting for an effect", and
//! "the intent itself was bad" are distinct variants so callers can fall
//! back, abort, or fix their input respectively. An ambiguous outcome is
//! not an error at all; it travels as a warning inside a successful
//! [`crate::outcome::ActionReport`].

use thiserror::Error;

use bracket_core::CoreError;
use bracket_surface::SurfaceError;

/// Execution error types.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("Page interaction failed: {0}")]
    Surface(SurfaceError),

    #[error("Gave up waiting for {what} after {attempts} attempts")]
    RetryExhausted { what: String, attempts: u32 },

    #[error("Invalid trade intent: {0}")]
    InvalidIntent(#[from] CoreError),

    #[error("Unreadable price text: {0:?}")]
    UnreadablePrice(String),
}

impl From<SurfaceError> for ExecError {
    fn from(err: SurfaceError) -> Self {
        match err {
            SurfaceError::ElementNotFound { selector } => Self::ElementNotFound { selector },
            other => Self::Surface(other),
        }
    }
}

/// Result type alias for execution operations.
pub type Result<T> = std::result::Result<T, ExecError>;
