//! Retry error types.

use thiserror::Error;

/// Why a retry loop stopped without success.
///
/// `Exhausted` carries the last result seen so callers can distinguish
/// "the operation kept producing the wrong thing" from "the operation
/// never ran" and can report what the final attempt saw.
#[derive(Debug, Error)]
pub enum RetryError<T> {
    #[error("retry budget exhausted after {attempts} attempts")]
    Exhausted {
        /// Attempts actually made.
        attempts: u32,
        /// Result of the final attempt.
        last: T,
    },

    #[error("retry cancelled after {attempts} attempts")]
    Cancelled {
        /// Attempts made before cancellation.
        attempts: u32,
    },
}

impl<T> RetryError<T> {
    /// Attempts made before the loop gave up.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Exhausted { attempts, .. } | Self::Cancelled { attempts } => *attempts,
        }
    }

    /// The final attempt's result, when the loop exhausted its budget.
    pub fn into_last(self) -> Option<T> {
        match self {
            Self::Exhausted { last, .. } => Some(last),
            Self::Cancelled { .. } => None,
        }
    }
}
