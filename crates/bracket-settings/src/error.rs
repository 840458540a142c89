//! Settings error types.

use thiserror::Error;

/// Settings persistence error types.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings file corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Result type alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
