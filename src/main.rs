// pagepress HTTP service
//
// Serves the capture pipeline over HTTP. Address and pipeline tunables
// come from the environment; everything else is wiring.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pagepress::{AppState, CaptureConfig, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr =
        std::env::var("PAGEPRESS_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    let mut config = CaptureConfig::builder();
    if let Ok(workers) = std::env::var("PAGEPRESS_WORKERS")
        && let Ok(workers) = workers.parse::<usize>()
    {
        config = config.worker_count(workers);
    }
    if let Ok(chrome) = std::env::var("PAGEPRESS_CHROME") {
        config = config.chrome_executable(Some(chrome.into()));
    }

    let state = AppState::new(config.build());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await
        .context("server error")?;

    Ok(())
}
