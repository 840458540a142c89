//! Element validation capability.
//!
//! Some environments ship a DOM helper that can tell whether an element is
//! actually clickable (visible, not covered, not disabled) before an
//! automated click is risked. The capability is injected explicitly;
//! where no helper exists, [`NoopValidator`] reports everything as fine
//! and the click is attempted regardless.

#[cfg_attr(test, mockall::automock)]
pub trait ElementValidator: Send + Sync {
    /// Whether a click on the first matching element would land.
    fn is_clickable(&self, selector: &str) -> bool;

    /// Whether the first matching element is visible.
    fn is_visible(&self, selector: &str) -> bool;
}

/// Always-true validator for environments without a validation helper.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopValidator;

impl ElementValidator for NoopValidator {
    fn is_clickable(&self, _selector: &str) -> bool {
        true
    }

    fn is_visible(&self, _selector: &str) -> bool {
        true
    }
}
