//! Getter methods for [`CaptureConfig`].

use std::path::PathBuf;
use std::time::Duration;

use super::types::CaptureConfig;

impl CaptureConfig {
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub fn retry_cooldown(&self) -> Duration {
        Duration::from_secs(self.retry_cooldown_secs)
    }

    #[must_use]
    pub fn page_load_timeout_secs(&self) -> u64 {
        self.page_load_timeout_secs
    }

    #[must_use]
    pub fn navigation_timeout_secs(&self) -> u64 {
        self.navigation_timeout_secs
    }

    #[must_use]
    pub fn render_settle(&self) -> Duration {
        Duration::from_millis(self.render_settle_ms)
    }

    #[must_use]
    pub fn consent_wait(&self) -> Duration {
        Duration::from_secs(self.consent_wait_secs)
    }

    #[must_use]
    pub fn consent_poll(&self) -> Duration {
        Duration::from_millis(self.consent_poll_ms)
    }

    #[must_use]
    pub fn post_consent_settle(&self) -> Duration {
        Duration::from_millis(self.post_consent_settle_ms)
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn chrome_executable(&self) -> Option<&PathBuf> {
        self.chrome_executable.as_ref()
    }
}
