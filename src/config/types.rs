//! Core configuration types for capture operations.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default fan-out pool width.
pub(crate) const DEFAULT_WORKER_COUNT: usize = 4;

/// Default retry attempts per URL (one session per attempt).
pub(crate) const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default cooldown between retry attempts, in seconds.
pub(crate) const DEFAULT_RETRY_COOLDOWN_SECS: u64 = 5;

/// Configuration for a batch capture operation.
///
/// All fields default to the service's wire-compatible behavior; the
/// builder only overrides what the caller names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Fixed width of the per-request worker pool.
    pub(crate) worker_count: usize,

    /// Attempts per URL before the entry is reported failed.
    pub(crate) max_attempts: u32,

    /// Fixed cooldown between attempts. No backoff, no jitter.
    pub(crate) retry_cooldown_secs: u64,

    /// Timeout for `page.goto()`.
    ///
    /// Prevents hangs on slow DNS, unresponsive servers, or streaming
    /// content.
    pub(crate) page_load_timeout_secs: u64,

    /// Timeout for `page.wait_for_navigation()`.
    pub(crate) navigation_timeout_secs: u64,

    /// Settle delay after navigation so client-side rendering can finish,
    /// in milliseconds. A plain sleep, not a readiness condition.
    pub(crate) render_settle_ms: u64,

    /// Bounded window to locate a clickable consent button.
    pub(crate) consent_wait_secs: u64,

    /// Poll interval while searching for the consent button, in
    /// milliseconds.
    pub(crate) consent_poll_ms: u64,

    /// Settle delay after clicking the consent button so the overlay can
    /// close, in milliseconds.
    pub(crate) post_consent_settle_ms: u64,

    /// Run the browser headless.
    pub(crate) headless: bool,

    /// Explicit Chrome/Chromium executable, overriding discovery.
    pub(crate) chrome_executable: Option<PathBuf>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_cooldown_secs: DEFAULT_RETRY_COOLDOWN_SECS,
            page_load_timeout_secs: 30,
            navigation_timeout_secs: 30,
            render_settle_ms: 1000,
            consent_wait_secs: 10,
            consent_poll_ms: 250,
            post_consent_settle_ms: 500,
            headless: true,
            chrome_executable: None,
        }
    }
}

impl CaptureConfig {
    /// Start building a configuration.
    #[must_use]
    pub fn builder() -> super::CaptureConfigBuilder {
        super::CaptureConfigBuilder::default()
    }
}
