//! Error types for bracket-contracts.

use thiserror::Error;

/// Contract resolution error types.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Invalid root symbol: {0:?} (expected 1-3 uppercase letters)")]
    InvalidRootSymbol(String),

    #[error("Invalid delivery month: {0} (expected 1-12)")]
    InvalidMonth(u32),
}

/// Result type alias for contract operations.
pub type Result<T> = std::result::Result<T, ContractError>;
