//! The retry loop itself.

use std::future::Future;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::error::RetryError;
use crate::policy::RetryPolicy;

/// Run `op` until `is_success` accepts its result, up to the policy's
/// attempt budget, sleeping the fixed interval between attempts.
///
/// Resolves with the first accepted result. When the budget runs out, the
/// last result is returned inside [`RetryError::Exhausted`].
///
/// `op` runs once per attempt and may have side effects (clicking a
/// button, submitting a form). The loop does not deduplicate those
/// effects; callers that click must make the click idempotent-safe
/// themselves.
pub async fn retry_until<T, Op, Fut, Pred>(
    policy: RetryPolicy,
    mut op: Op,
    mut is_success: Pred,
) -> Result<T, RetryError<T>>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = T>,
    Pred: FnMut(&T) -> bool,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let result = op().await;

        if is_success(&result) {
            trace!(attempts, "retry succeeded");
            return Ok(result);
        }

        if attempts >= max_attempts {
            debug!(attempts, "retry budget exhausted");
            return Err(RetryError::Exhausted {
                attempts,
                last: result,
            });
        }

        sleep(policy.interval).await;
    }
}

/// Like [`retry_until`], but stops as soon as the token is cancelled,
/// including during the between-attempt sleep. An attempt already in
/// flight runs to completion; its result is checked before the token.
pub async fn retry_until_cancelled<T, Op, Fut, Pred>(
    token: &CancellationToken,
    policy: RetryPolicy,
    mut op: Op,
    mut is_success: Pred,
) -> Result<T, RetryError<T>>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = T>,
    Pred: FnMut(&T) -> bool,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempts = 0u32;

    loop {
        if token.is_cancelled() {
            debug!(attempts, "retry cancelled before attempt");
            return Err(RetryError::Cancelled { attempts });
        }

        attempts += 1;
        let result = op().await;

        if is_success(&result) {
            trace!(attempts, "retry succeeded");
            return Ok(result);
        }

        if attempts >= max_attempts {
            debug!(attempts, "retry budget exhausted");
            return Err(RetryError::Exhausted {
                attempts,
                last: result,
            });
        }

        tokio::select! {
            _ = token.cancelled() => {
                debug!(attempts, "retry cancelled during interval");
                return Err(RetryError::Cancelled { attempts });
            }
            _ = sleep(policy.interval) => {}
        }
    }
}
