//! Page rendering: navigate, settle, dismiss consent, capture.
//!
//! Both capture modes share the same loading sequence: navigate with an
//! explicit deadline, give client-side rendering a fixed settle delay, then
//! try to dismiss a cookie-consent overlay before capturing. Capture is
//! either the browser's print-to-PDF (page layout, backgrounds on, CSS page
//! size preferred) or a visible-text snapshot of the rendered DOM.

mod consent;
mod text_extract;

pub use consent::dismiss_consent_overlay;
pub use text_extract::visible_text;

use std::future::Future;
use std::time::Duration;

use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use tracing::{debug, warn};

use crate::config::CaptureConfig;
use crate::error::{CaptureError, CaptureResult};
use crate::session::BrowserSession;

/// Wrap a page operation with an explicit deadline.
///
/// Distinguishes the operation's own failure from the deadline elapsing so
/// retries can log which one happened.
pub(crate) async fn with_deadline<F, T, E>(
    operation: F,
    secs: u64,
    operation_name: &str,
) -> CaptureResult<T>
where
    F: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    match tokio::time::timeout(Duration::from_secs(secs), operation).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(CaptureError::Render {
            url: String::new(),
            reason: format!("{operation_name}: {e}"),
        }),
        Err(_) => Err(CaptureError::Timeout {
            operation: operation_name.to_string(),
            secs,
        }),
    }
}

/// Navigate to `url` and run the shared settle/consent sequence.
///
/// Returns the loaded page, ready for capture.
async fn load_page(
    session: &BrowserSession,
    config: &CaptureConfig,
    url: &str,
) -> CaptureResult<Page> {
    let page = session
        .browser()
        .new_page("about:blank")
        .await
        .map_err(|e| CaptureError::Render {
            url: url.to_string(),
            reason: format!("failed to create page: {e}"),
        })?;

    with_deadline(
        page.goto(url),
        config.page_load_timeout_secs(),
        "Page navigation",
    )
    .await
    .map_err(|e| tag_url(e, url))?;

    with_deadline(
        page.wait_for_navigation(),
        config.navigation_timeout_secs(),
        "Page load",
    )
    .await
    .map_err(|e| tag_url(e, url))?;

    // Client-side rendering gets a fixed grace period
    tokio::time::sleep(config.render_settle()).await;

    if dismiss_consent_overlay(&page, config).await {
        debug!(url = %url, "dismissed cookie consent pop-up");
        tokio::time::sleep(config.post_consent_settle()).await;
    } else {
        warn!(url = %url, "no cookie consent pop-up found or could not be dismissed");
    }

    Ok(page)
}

/// Attach the URL to per-URL error variants produced below `load_page`.
fn tag_url(err: CaptureError, url: &str) -> CaptureError {
    match err {
        CaptureError::Render { reason, .. } => CaptureError::Navigation {
            url: url.to_string(),
            reason,
        },
        other => other,
    }
}

/// Render `url` to PDF bytes via the browser's print-to-PDF capability.
pub async fn render_pdf(
    session: &BrowserSession,
    config: &CaptureConfig,
    url: &str,
) -> CaptureResult<Vec<u8>> {
    let page = load_page(session, config, url).await?;

    let params = PrintToPdfParams::builder()
        .landscape(false)
        .display_header_footer(false)
        .print_background(true)
        .prefer_css_page_size(true)
        .build();

    let pdf = page.pdf(params).await.map_err(|e| CaptureError::Render {
        url: url.to_string(),
        reason: format!("print-to-PDF failed: {e}"),
    })?;

    debug!(url = %url, size = pdf.len(), "rendered PDF");
    close_page(page, url).await;
    Ok(pdf)
}

/// Extract the visible text of `url` from the rendered DOM.
pub async fn extract_text(
    session: &BrowserSession,
    config: &CaptureConfig,
    url: &str,
) -> CaptureResult<String> {
    let page = load_page(session, config, url).await?;

    let html = page.content().await.map_err(|e| CaptureError::Render {
        url: url.to_string(),
        reason: format!("failed to snapshot DOM: {e}"),
    })?;

    close_page(page, url).await;

    let text = visible_text(&html);
    debug!(url = %url, chars = text.len(), "extracted text");
    Ok(text)
}

async fn close_page(page: Page, url: &str) {
    if let Err(e) = page.close().await {
        warn!(url = %url, "failed to close page: {e}");
    }
}
