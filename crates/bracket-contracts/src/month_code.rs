//! CME delivery month codes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ContractError, Result};

/// Delivery month letter per the CME convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonthCode {
    /// January
    F,
    /// February
    G,
    /// March
    H,
    /// April
    J,
    /// May
    K,
    /// June
    M,
    /// July
    N,
    /// August
    Q,
    /// September
    U,
    /// October
    V,
    /// November
    X,
    /// December
    Z,
}

impl MonthCode {
    /// All twelve codes, indexed by zero-based month.
    pub const ALL: [MonthCode; 12] = [
        Self::F,
        Self::G,
        Self::H,
        Self::J,
        Self::K,
        Self::M,
        Self::N,
        Self::Q,
        Self::U,
        Self::V,
        Self::X,
        Self::Z,
    ];

    /// Code for a one-based calendar month.
    pub fn for_month(month: u32) -> Result<Self> {
        Self::ALL
            .get(month.wrapping_sub(1) as usize)
            .copied()
            .ok_or(ContractError::InvalidMonth(month))
    }

    /// Code for a letter as it appears in a dated symbol.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'F' => Some(Self::F),
            'G' => Some(Self::G),
            'H' => Some(Self::H),
            'J' => Some(Self::J),
            'K' => Some(Self::K),
            'M' => Some(Self::M),
            'N' => Some(Self::N),
            'Q' => Some(Self::Q),
            'U' => Some(Self::U),
            'V' => Some(Self::V),
            'X' => Some(Self::X),
            'Z' => Some(Self::Z),
            _ => None,
        }
    }

    /// One-based calendar month.
    pub fn month(&self) -> u32 {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .map(|i| i as u32 + 1)
            .unwrap_or(0)
    }

    /// Whether this is one of the four quarterly delivery months
    /// (H=Mar, M=Jun, U=Sep, Z=Dec) index futures actually trade.
    pub fn is_quarterly(&self) -> bool {
        matches!(self, Self::H | Self::M | Self::U | Self::Z)
    }

    pub fn letter(&self) -> char {
        match self {
            Self::F => 'F',
            Self::G => 'G',
            Self::H => 'H',
            Self::J => 'J',
            Self::K => 'K',
            Self::M => 'M',
            Self::N => 'N',
            Self::Q => 'Q',
            Self::U => 'U',
            Self::V => 'V',
            Self::X => 'X',
            Self::Z => 'Z',
        }
    }
}

impl fmt::Display for MonthCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Month letter plus single year digit, e.g. `U5` for September 2025.
///
/// Derived from a timestamp on every use, never persisted. The quarterly
/// roll resolver only ever produces H/M/U/Z; the monthly resolver can
/// produce any of the twelve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractCode {
    pub month: MonthCode,
    /// Last digit of the delivery year (2025 -> 5).
    pub year_digit: u8,
}

impl ContractCode {
    pub fn new(month: MonthCode, year_digit: u8) -> Self {
        Self { month, year_digit }
    }
}

impl fmt::Display for ContractCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.month, self.year_digit)
    }
}
