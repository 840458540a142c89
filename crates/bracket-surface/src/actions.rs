//! Clicks with selector fallback.

use tracing::{debug, warn};

use crate::error::{Result, SurfaceError};
use crate::surface::PageSurface;
use crate::validator::ElementValidator;

/// Click the first candidate that exists and passes validation.
///
/// Candidates are tried in order. A candidate that matches nothing is
/// skipped silently; one that exists but fails the clickability check is
/// skipped with a warning, since that usually means the panel is showing
/// a disabled or covered button. Returns the selector actually clicked.
pub fn click_with_fallback<'a>(
    surface: &dyn PageSurface,
    validator: &dyn ElementValidator,
    candidates: &'a [String],
) -> Result<&'a str> {
    for selector in candidates {
        if !surface.exists(selector) {
            continue;
        }
        if !validator.is_clickable(selector) {
            warn!(selector = selector.as_str(), "element present but not clickable, trying fallback");
            continue;
        }
        surface.click(selector)?;
        debug!(selector = selector.as_str(), "clicked");
        return Ok(selector);
    }

    Err(SurfaceError::ElementNotFound {
        selector: candidates.join(", "),
    })
}
