//! Concurrent fan-out over a batch of URLs.
//!
//! One bounded worker pool per batch, created and torn down with the
//! request. Every unit of work owns its browser session exclusively;
//! results are collected in completion order, so callers must not rely on
//! artifact order matching input order. A failing entry degrades the batch
//! instead of aborting it, and the outcome reports which URLs failed and
//! why rather than swallowing failures into the log.

mod retry;

pub use retry::with_retries;

use std::future::Future;
use std::sync::Arc;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::artifact::Artifact;
use crate::cancel::CancelToken;
use crate::config::CaptureConfig;
use crate::error::{CaptureError, CaptureResult};
use crate::render;
use crate::session::BrowserSession;
use crate::textpdf;

/// What a capture task produces from a loaded page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    /// Full-page rendering via the browser's print-to-PDF.
    PrintToPdf,
    /// Visible-text snapshot re-encoded as a paginated PDF.
    TextToPdf,
}

/// Result of a batch run: artifacts in completion order plus one
/// `(url, reason)` entry per URL that yielded nothing.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub successes: Vec<Artifact>,
    pub failures: Vec<(String, String)>,
}

impl BatchOutcome {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.successes.is_empty()
    }
}

/// Prefix the default scheme when none is present.
///
/// Matches the service's historical behavior: anything already starting
/// with `http` is passed through untouched.
#[must_use]
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

/// One full capture attempt: open a session, capture, tear the session
/// down regardless of outcome.
pub async fn capture_once(
    mode: CaptureMode,
    config: &CaptureConfig,
    url: &str,
) -> CaptureResult<Artifact> {
    let session = BrowserSession::open(config).await?;
    let outcome = match mode {
        CaptureMode::PrintToPdf => match render::render_pdf(&session, config, url).await {
            Ok(bytes) => Artifact::from_bytes("pdf", &bytes),
            Err(e) => Err(e),
        },
        CaptureMode::TextToPdf => match render::extract_text(&session, config, url).await {
            Ok(text) => textpdf::text_to_pdf(&text),
            Err(e) => Err(e),
        },
    };
    session.close().await;
    outcome
}

/// Run the retry-wrapped browser capture over a batch of URLs.
pub async fn run_batch(
    urls: &[String],
    config: &CaptureConfig,
    mode: CaptureMode,
    cancel: &CancelToken,
) -> BatchOutcome {
    let attempt_config = config.clone();
    run_batch_with(urls, config, cancel, move |url| {
        let config = attempt_config.clone();
        async move { capture_once(mode, &config, &url).await }
    })
    .await
}

/// Fan-out core, generic over the single-attempt operation.
///
/// `operation` is called once per retry attempt with the normalized URL
/// and is expected to run one full session cycle. URLs are submitted in
/// input order through a pool of `config.worker_count()` permits and
/// collected in completion order. The cancel token is checked when each
/// task starts and again when its result is collected; artifacts that
/// complete after cancellation are deleted and reported as cancelled.
pub async fn run_batch_with<F, Fut>(
    urls: &[String],
    config: &CaptureConfig,
    cancel: &CancelToken,
    operation: F,
) -> BatchOutcome
where
    F: Fn(String) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = CaptureResult<Artifact>> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(config.worker_count()));
    let mut tasks = FuturesUnordered::new();

    for raw in urls {
        let url = normalize_url(raw);
        let semaphore = Arc::clone(&semaphore);
        let config = config.clone();
        let cancel = cancel.clone();
        let operation = operation.clone();

        tasks.push(tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return (url, None, Some(CaptureError::Cancelled.to_string())),
            };

            if cancel.is_cancelled() {
                debug!(url = %url, "skipping task, batch cancelled");
                return (url, None, Some(CaptureError::Cancelled.to_string()));
            }

            let (artifact, failure) = with_retries(&url, &config, |attempt| {
                debug!(url = %url, attempt, "starting capture attempt");
                operation(url.clone())
            })
            .await;
            (url, artifact, failure)
        }));
    }

    let mut outcome = BatchOutcome::default();
    while let Some(joined) = tasks.next().await {
        match joined {
            Ok((url, Some(artifact), _)) => {
                if cancel.is_cancelled() {
                    info!(url = %url, "discarding artifact completed after cancellation");
                    artifact.delete();
                    outcome
                        .failures
                        .push((url, CaptureError::Cancelled.to_string()));
                } else {
                    outcome.successes.push(artifact);
                }
            }
            Ok((url, None, failure)) => {
                let reason = failure.unwrap_or_else(|| "no result".to_string());
                info!(url = %url, "batch entry failed: {reason}");
                outcome.failures.push((url, reason));
            }
            Err(e) => {
                warn!("capture task panicked: {e}");
            }
        }
    }

    info!(
        succeeded = outcome.successes.len(),
        failed = outcome.failures.len(),
        "batch complete"
    );
    outcome
}
