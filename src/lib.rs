pub mod archive;
pub mod artifact;
pub mod batch;
pub mod cancel;
pub mod config;
pub mod error;
pub mod pdf;
pub mod render;
pub mod server;
pub mod session;
pub mod textpdf;

pub use artifact::Artifact;
pub use batch::{BatchOutcome, CaptureMode, normalize_url, run_batch};
pub use cancel::CancelToken;
pub use config::CaptureConfig;
pub use error::{CaptureError, CaptureResult};
pub use pdf::{PageLink, extract_links, merge_pdfs, write_links_csv};
pub use server::{AppState, create_router};
pub use session::BrowserSession;

use tracing::info;

/// Capture a batch of URLs as PDF artifacts with the default print mode.
///
/// Convenience entry point for library users; the HTTP layer drives
/// [`batch::run_batch`] directly.
pub async fn capture(urls: &[String], config: CaptureConfig) -> BatchOutcome {
    let cancel = CancelToken::new();
    let outcome = run_batch(urls, &config, CaptureMode::PrintToPdf, &cancel).await;
    info!(
        requested = urls.len(),
        captured = outcome.successes.len(),
        "capture finished"
    );
    outcome
}
