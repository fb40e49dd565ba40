//! HTTP surface for the capture pipeline.
//!
//! Thin wiring: every endpoint drives the batch/merge/archive layers and
//! maps their outcomes onto the wire-compatible responses the service has
//! always produced. Failures surface as a 500 with a JSON `detail`
//! message string; no structured error codes.

mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::cancel::CancelToken;
use crate::config::CaptureConfig;

/// Shared server state: the pipeline configuration plus the cancel token
/// that `POST /stop` trips.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub config: CaptureConfig,
    pub cancel: CancelToken,
}

impl AppState {
    #[must_use]
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
        }
    }
}

/// Build the service router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/web2pdf", post(handlers::web2pdf))
        // Trailing slash kept for wire compatibility
        .route("/web2text/", post(handlers::web2text))
        .route("/all2pdf", post(handlers::all2pdf))
        .route("/stop", post(handlers::stop))
        // The original service ran with allow-all CORS for local frontends
        .layer(CorsLayer::permissive())
        .with_state(state)
}
