//! Bounded retry around a single-URL capture attempt.

use std::future::Future;

use tracing::warn;

use crate::artifact::Artifact;
use crate::config::CaptureConfig;
use crate::error::CaptureResult;

/// Run `attempt` up to `config.max_attempts()` times, with a fixed cooldown
/// between attempts.
///
/// Each call of `attempt` is one full session cycle: the closure opens its
/// own browser session and tears it down before returning, so no state
/// survives from one attempt to the next. No backoff, no jitter.
///
/// Returns the first successful artifact, or `None` plus the last failure
/// reason once all attempts are exhausted.
pub async fn with_retries<F, Fut>(
    url: &str,
    config: &CaptureConfig,
    mut attempt: F,
) -> (Option<Artifact>, Option<String>)
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = CaptureResult<Artifact>>,
{
    let max_attempts = config.max_attempts();
    let mut last_failure = None;

    for n in 1..=max_attempts {
        match attempt(n).await {
            Ok(artifact) => return (Some(artifact), None),
            Err(e) => {
                warn!(url = %url, attempt = n, max_attempts, "attempt failed: {e}");
                last_failure = Some(e.to_string());
            }
        }
        if n < max_attempts {
            tokio::time::sleep(config.retry_cooldown()).await;
        }
    }

    warn!(url = %url, "giving up after {max_attempts} attempts");
    (None, last_failure)
}
