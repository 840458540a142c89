//! Root symbol validation and symbol normalization.
//!
//! Users type either a bare product root ("NQ") or a fully dated contract
//! symbol ("NQZ5") into the symbol box. Every trade action re-normalizes
//! the stored text, so a bare root always expands against the roll calendar
//! at action time rather than at entry time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ContractError, Result};
use crate::month_code::{ContractCode, MonthCode};
use crate::roll::active_quarterly_at;

/// Validated 1-3 letter uppercase product root (e.g. "NQ", "ES", "MNQ").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RootSymbol(String);

impl RootSymbol {
    pub fn parse(s: &str) -> Result<Self> {
        if is_bare_root(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ContractError::InvalidRootSymbol(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RootSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether the text is a bare root: 1-3 ASCII uppercase letters, nothing
/// else. Case-sensitive on purpose; lowercase input is not treated as a
/// root (see `normalize_symbol_at`).
fn is_bare_root(s: &str) -> bool {
    (1..=3).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_uppercase())
}

/// Expand a symbol for use at a given instant.
///
/// A bare root gets the active quarterly contract code appended
/// ("NQ" -> "NQZ5"). Anything else is returned uppercased and otherwise
/// untouched, on the assumption that it is already a dated symbol. There
/// is no validation beyond the root check; unrecognized text passes
/// through so the panel can reject it visibly.
pub fn normalize_symbol_at(input: &str, at: DateTime<Utc>) -> String {
    let trimmed = input.trim();
    if is_bare_root(trimmed) {
        let code = active_quarterly_at(at);
        format!("{trimmed}{code}")
    } else {
        trimmed.to_uppercase()
    }
}

/// Expand a symbol against the current roll calendar.
pub fn normalize_symbol(input: &str) -> String {
    normalize_symbol_at(input, Utc::now())
}

/// Split a dated symbol into root and contract code.
///
/// `"NQZ5"` -> `("NQ", Z5)`. Returns `None` when the text does not end in
/// a month letter plus year digit, or the remaining root is not 1-3
/// uppercase letters.
pub fn split_qualified(symbol: &str) -> Option<(&str, ContractCode)> {
    let mut chars = symbol.chars().rev();
    let digit = chars.next()?.to_digit(10)?;
    let month = MonthCode::from_letter(chars.next()?)?;

    let root = &symbol[..symbol.len() - 2];
    if is_bare_root(root) {
        Some((root, ContractCode::new(month, digit as u8)))
    } else {
        None
    }
}
