//! Per-task browser sessions.
//!
//! Every capture attempt gets its own isolated headless Chromium instance
//! with a unique profile directory. There is no pooling: a stuck or
//! corrupted session is discarded with its attempt, and the next attempt
//! starts from a clean process. [`BrowserSession`] owns the browser, the
//! CDP handler task, and the profile directory, and releases all three on
//! every exit path.

use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use futures::StreamExt;
use tokio::task::{self, JoinHandle};
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use crate::config::CaptureConfig;
use crate::error::{CaptureError, CaptureResult};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// An isolated headless browser instance owned by a single capture attempt.
///
/// Dropping the session aborts the CDP handler task and removes the profile
/// directory; the browser process itself is killed when the inner
/// [`Browser`] drops. Prefer [`BrowserSession::close`] for a graceful
/// shutdown.
#[derive(Debug)]
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    profile_dir: Option<PathBuf>,
}

impl BrowserSession {
    /// Launch a fresh browser session.
    ///
    /// Fails with [`CaptureError::SessionStart`] when no executable can be
    /// found or the process does not come up.
    pub async fn open(config: &CaptureConfig) -> CaptureResult<Self> {
        launch(config)
            .await
            .map_err(|e| CaptureError::SessionStart(format!("{e:#}")))
    }

    /// The controllable browser handle.
    #[must_use]
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Gracefully shut the session down: close the browser, reap the
    /// process, abort the handler task, and remove the profile directory.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("failed to close browser: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            warn!("failed to reap browser process: {e}");
        }
        self.handler.abort();
        self.cleanup_profile_dir();
    }

    fn cleanup_profile_dir(&mut self) {
        if let Some(dir) = self.profile_dir.take() {
            if let Err(e) = std::fs::remove_dir_all(&dir) {
                warn!(dir = %dir.display(), "failed to remove profile directory: {e}");
            }
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
        self.cleanup_profile_dir();
    }
}

/// Find a Chrome/Chromium executable.
///
/// Order: explicit config override, `CHROMIUM_PATH` environment variable,
/// platform-specific well-known paths, then `which` on Unix systems.
pub async fn find_browser_executable(config: &CaptureConfig) -> Result<PathBuf> {
    if let Some(path) = config.chrome_executable() {
        if path.exists() {
            return Ok(path.clone());
        }
        warn!(
            "configured chrome executable does not exist: {}",
            path.display()
        );
    }

    if let Ok(path) = std::env::var("CHROMIUM_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("using browser from CHROMIUM_PATH: {}", path.display());
            return Ok(path);
        }
        warn!(
            "CHROMIUM_PATH points to non-existent file: {}",
            path.display()
        );
    }

    let candidates: &[&str] = if cfg!(target_os = "windows") {
        &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files\Chromium\Application\chrome.exe",
        ]
    } else if cfg!(target_os = "macos") {
        &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/opt/homebrew/bin/chromium",
        ]
    } else {
        &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
            "/opt/google/chrome/chrome",
        ]
    };

    for candidate in candidates {
        let path = PathBuf::from(candidate);
        if path.exists() {
            debug!("found browser at: {}", path.display());
            return Ok(path);
        }
    }

    if !cfg!(target_os = "windows") {
        for cmd in &["chromium", "chromium-browser", "google-chrome", "chrome"] {
            let output = Command::new("which").arg(cmd).output();
            if let Ok(output) = output
                && output.status.success()
            {
                let path_str = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path_str.is_empty() {
                    debug!("found browser via which: {path_str}");
                    return Ok(PathBuf::from(path_str));
                }
            }
        }
    }

    Err(anyhow::anyhow!("Chrome/Chromium executable not found"))
}

/// Download a managed Chromium when no system browser exists.
///
/// The download is cached under the user cache directory so only the first
/// session pays for it.
pub async fn download_managed_browser() -> Result<PathBuf> {
    info!("no system browser found, downloading managed Chromium");

    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("pagepress")
        .join("chromium");
    std::fs::create_dir_all(&cache_dir).context("failed to create browser cache directory")?;

    let fetcher = BrowserFetcher::new(
        BrowserFetcherOptions::builder()
            .with_path(&cache_dir)
            .build()
            .context("failed to build fetcher options")?,
    );
    let revision = fetcher.fetch().await.context("failed to fetch browser")?;

    info!("downloaded Chromium to {}", revision.folder_path.display());
    Ok(revision.executable_path)
}

async fn launch(config: &CaptureConfig) -> Result<BrowserSession> {
    let executable = match find_browser_executable(config).await {
        Ok(path) => path,
        Err(_) => download_managed_browser().await?,
    };

    let profile_dir =
        std::env::temp_dir().join(format!("pagepress_profile_{}", Uuid::new_v4().simple()));
    std::fs::create_dir_all(&profile_dir).context("failed to create profile directory")?;

    let mut builder = BrowserConfigBuilder::default()
        .request_timeout(Duration::from_secs(config.page_load_timeout_secs()))
        .window_size(1920, 1080)
        .user_data_dir(profile_dir.clone())
        .chrome_executable(executable);

    if config.headless() {
        builder = builder.headless_mode(HeadlessMode::default());
    } else {
        builder = builder.with_head();
    }

    builder = builder
        .arg(format!("--user-agent={USER_AGENT}"))
        .arg("--no-sandbox")
        .arg("--disable-setuid-sandbox")
        .arg("--disable-gpu")
        .arg("--disable-dev-shm-usage")
        .arg("--disable-software-rasterizer")
        .arg("--no-first-run")
        .arg("--no-default-browser-check")
        .arg("--disable-extensions")
        .arg("--disable-background-networking")
        .arg("--disable-print-preview")
        .arg("--hide-scrollbars")
        .arg("--mute-audio");

    let browser_config = builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

    let (browser, mut handler) = Browser::launch(browser_config)
        .await
        .context("failed to launch browser")?;

    let handler_task = task::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                let msg = e.to_string();
                // Chrome emits CDP events chromiumoxide cannot deserialize;
                // those are not actionable (mattsse/chromiumoxide#167, #229)
                let benign = msg.contains("data did not match any variant of untagged enum Message")
                    || msg.contains("Failed to deserialize WS response");
                if benign {
                    trace!("suppressed benign CDP error: {msg}");
                } else {
                    warn!("browser handler error: {msg}");
                }
            }
        }
        debug!("browser handler task finished");
    });

    debug!(profile = %profile_dir.display(), "browser session started");

    Ok(BrowserSession {
        browser,
        handler: handler_task,
        profile_dir: Some(profile_dir),
    })
}
