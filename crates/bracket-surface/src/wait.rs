//! Bounded element waits.

use bracket_retry::{retry_until, RetryPolicy};
use tracing::debug;

use crate::error::{Result, SurfaceError};
use crate::surface::PageSurface;

/// Poll until an element matching the selector appears.
///
/// Exhausting the policy maps to [`SurfaceError::ElementNotFound`]; the
/// caller decides whether that aborts the action or triggers a fallback.
/// Wait budgets are set per call site, typically a few seconds for ticket
/// inputs and longer for tables that render after login.
pub async fn wait_for_element(
    surface: &dyn PageSurface,
    selector: &str,
    policy: RetryPolicy,
) -> Result<()> {
    retry_until(policy, move || async move { surface.exists(selector) }, |found| *found)
        .await
        .map(|_| ())
        .map_err(|err| {
            debug!(selector, attempts = err.attempts(), "element never appeared");
            SurfaceError::ElementNotFound {
                selector: selector.to_string(),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Surface whose elements appear after a fixed number of `exists`
    /// polls, to exercise the wait loop.
    struct LatePage {
        appears_after: u32,
        polls: AtomicU32,
        present: Mutex<HashSet<String>>,
    }

    impl LatePage {
        fn new(appears_after: u32, selector: &str) -> Self {
            let mut present = HashSet::new();
            present.insert(selector.to_string());
            Self {
                appears_after,
                polls: AtomicU32::new(0),
                present: Mutex::new(present),
            }
        }
    }

    impl PageSurface for LatePage {
        fn exists(&self, selector: &str) -> bool {
            let n = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
            n > self.appears_after && self.present.lock().contains(selector)
        }

        fn read_text(&self, _selector: &str) -> Result<String> {
            Ok(String::new())
        }

        fn read_table(&self, _selector: &str) -> Result<Vec<Vec<String>>> {
            Ok(vec![])
        }

        fn set_value(&self, _selector: &str, _value: &str) -> Result<()> {
            Ok(())
        }

        fn click(&self, _selector: &str) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_waits_for_late_element() {
        let page = LatePage::new(2, ".late");
        let policy = RetryPolicy::from_millis(5, 5);
        assert!(wait_for_element(&page, ".late", policy).await.is_ok());
        assert_eq!(page.polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_missing_element_reports_not_found() {
        let page = LatePage::new(0, ".present");
        let policy = RetryPolicy::from_millis(3, 5);
        let err = wait_for_element(&page, ".absent", policy)
            .await
            .unwrap_err();
        match err {
            SurfaceError::ElementNotFound { selector } => assert_eq!(selector, ".absent"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
