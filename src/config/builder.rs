//! Fluent builder for [`CaptureConfig`].

use std::path::PathBuf;

use super::types::CaptureConfig;

/// Builder for [`CaptureConfig`]. Every field is optional; unset fields
/// keep the defaults from `CaptureConfig::default()`.
#[derive(Debug, Default)]
pub struct CaptureConfigBuilder {
    config: CaptureConfig,
}

impl CaptureConfigBuilder {
    #[must_use]
    pub fn worker_count(mut self, count: usize) -> Self {
        // A zero-width pool would deadlock the semaphore
        self.config.worker_count = count.max(1);
        self
    }

    #[must_use]
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts.max(1);
        self
    }

    #[must_use]
    pub fn retry_cooldown_secs(mut self, secs: u64) -> Self {
        self.config.retry_cooldown_secs = secs;
        self
    }

    #[must_use]
    pub fn page_load_timeout_secs(mut self, secs: u64) -> Self {
        self.config.page_load_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn navigation_timeout_secs(mut self, secs: u64) -> Self {
        self.config.navigation_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn render_settle_ms(mut self, ms: u64) -> Self {
        self.config.render_settle_ms = ms;
        self
    }

    #[must_use]
    pub fn consent_wait_secs(mut self, secs: u64) -> Self {
        self.config.consent_wait_secs = secs;
        self
    }

    #[must_use]
    pub fn consent_poll_ms(mut self, ms: u64) -> Self {
        self.config.consent_poll_ms = ms.max(1);
        self
    }

    #[must_use]
    pub fn post_consent_settle_ms(mut self, ms: u64) -> Self {
        self.config.post_consent_settle_ms = ms;
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    #[must_use]
    pub fn chrome_executable(mut self, path: Option<PathBuf>) -> Self {
        self.config.chrome_executable = path;
        self
    }

    #[must_use]
    pub fn build(self) -> CaptureConfig {
        self.config
    }
}
