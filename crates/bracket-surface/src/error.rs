//! Surface error types.

use thiserror::Error;

/// Page interaction error types.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// No element matched the selector (or, for action buttons, any of
    /// the fallback selectors) within the caller's wait budget.
    #[error("Element not found: {selector}")]
    ElementNotFound { selector: String },

    /// An element was found but reading its content failed.
    #[error("Read failed for {selector}: {reason}")]
    ReadFailed { selector: String, reason: String },

    /// An element was found but the interaction did not take.
    #[error("Interaction failed for {selector}: {reason}")]
    InteractionFailed { selector: String, reason: String },
}

/// Result type alias for surface operations.
pub type Result<T> = std::result::Result<T, SurfaceError>;
