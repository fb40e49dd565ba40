//! Best-effort cookie-consent dismissal.
//!
//! Polls the page for a clickable element whose visible text contains
//! "Accept" and clicks the first match. Sites without an English-labeled
//! consent button are treated as having no overlay at all; the caller only
//! logs a warning. The literal match is deliberate and is not broadened.

use chromiumoxide::Page;
use tokio::time::Instant;
use tracing::trace;

use crate::config::CaptureConfig;

/// Clicks the first button-like element whose text contains "Accept".
/// Returns whether anything was clicked.
const CLICK_CONSENT_JS: &str = r#"
(() => {
    const candidates = document.querySelectorAll('button, [role="button"], input[type="button"], input[type="submit"], a');
    for (const el of candidates) {
        const text = (el.innerText || el.value || '').trim();
        if (text.includes('Accept')) {
            el.click();
            return true;
        }
    }
    return false;
})()
"#;

/// Poll for a consent button within the configured window and click it.
///
/// Returns `true` if a button was found and clicked, `false` when the
/// window elapsed without a match. Never errors: evaluation failures count
/// as "not found" for that poll round.
pub async fn dismiss_consent_overlay(page: &Page, config: &CaptureConfig) -> bool {
    let deadline = Instant::now() + config.consent_wait();

    loop {
        match page.evaluate(CLICK_CONSENT_JS).await {
            Ok(result) => match result.into_value::<bool>() {
                Ok(true) => return true,
                Ok(false) => {}
                Err(e) => trace!("consent probe returned non-bool: {e}"),
            },
            Err(e) => trace!("consent probe failed: {e}"),
        }

        if Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(config.consent_poll()).await;
    }
}
