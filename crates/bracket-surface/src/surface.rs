//! The page capability trait.

use crate::error::Result;

/// Read and mutate the trading panel page.
///
/// Methods are synchronous: a page query either answers immediately or the
/// element is not there, and all waiting lives in the retry layer above.
/// Implementations receive CSS selectors on every call; they must not hand
/// out element handles, because the host application re-renders at any
/// time and a cached node can go stale between two calls.
pub trait PageSurface: Send + Sync {
    /// Whether at least one element currently matches the selector.
    fn exists(&self, selector: &str) -> bool;

    /// Text content of the first matching element.
    fn read_text(&self, selector: &str) -> Result<String>;

    /// Cell text of the table matching the selector, row-major.
    ///
    /// Header rows are excluded; an empty table yields an empty vec.
    fn read_table(&self, selector: &str) -> Result<Vec<Vec<String>>>;

    /// Set the value of the first matching input, firing whatever change
    /// notification the backing page needs to register it.
    fn set_value(&self, selector: &str, value: &str) -> Result<()>;

    /// Click the first matching element.
    fn click(&self, selector: &str) -> Result<()>;
}
