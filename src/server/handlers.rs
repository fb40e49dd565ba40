//! Endpoint handlers.

use std::time::Instant;

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use super::AppState;
use crate::artifact::{Artifact, delete_all};
use crate::batch::{CaptureMode, run_batch};
use crate::cancel::CancelToken;
use crate::error::CaptureError;
use crate::pdf::{extract_links, merge_pdfs, write_links_csv};

/// Request body shared by all capture endpoints.
#[derive(Debug, Deserialize)]
pub struct UrlList {
    pub urls: Vec<String>,
}

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Trip the cancel token. In-flight sessions are not interrupted; the
/// confirmation only promises that no further results will be accepted.
pub async fn stop(State(state): State<AppState>) -> impl IntoResponse {
    state.cancel.cancel();
    info!("cancellation requested");
    Json(json!({ "message": "Processing stopped" }))
}

/// `POST /web2pdf` — render every URL, answer with the first PDF.
pub async fn web2pdf(
    State(state): State<AppState>,
    Json(payload): Json<UrlList>,
) -> Response {
    let start = Instant::now();
    state.cancel.reset();

    let outcome = run_batch(
        &payload.urls,
        &state.config,
        CaptureMode::PrintToPdf,
        &state.cancel,
    )
    .await;

    if outcome.is_empty() {
        return internal_error("Failed to generate PDFs");
    }

    // The original service answered with the first PDF only; the rest are
    // rendered, then discarded
    let first = outcome.successes[0].clone();
    file_response(
        first,
        "application/pdf",
        Some(start.elapsed().as_secs_f64()),
        outcome.successes,
    )
}

/// `POST /web2text/` — extract text from every URL, answer with one PDF
/// (merged when several URLs succeeded).
pub async fn web2text(
    State(state): State<AppState>,
    Json(payload): Json<UrlList>,
) -> Response {
    let outcome = run_batch(
        &payload.urls,
        &state.config,
        CaptureMode::TextToPdf,
        &CancelToken::new(),
    )
    .await;

    if outcome.is_empty() {
        return internal_error("Failed to extract text and convert to PDFs");
    }

    if let [only] = outcome.successes.as_slice() {
        let only = only.clone();
        return file_response(only, "application/pdf", None, outcome.successes);
    }

    let inputs = outcome.successes;
    let merge_inputs = inputs.clone();
    let merged = match spawn_pdf_work(move || merge_pdfs(&merge_inputs)).await {
        Ok(artifact) => artifact,
        Err(e) => {
            delete_all(&inputs);
            return internal_error(&e.to_string());
        }
    };

    delete_all(&inputs);
    file_response(merged.clone(), "application/pdf", None, vec![merged])
}

/// `POST /all2pdf` — render every URL, follow every link discovered in the
/// merged result, and answer with a zip of all PDFs plus a link CSV.
pub async fn all2pdf(
    State(state): State<AppState>,
    Json(payload): Json<UrlList>,
) -> Response {
    let start = Instant::now();
    // /stop only governs /web2pdf; this pipeline runs to completion
    let cancel = CancelToken::new();

    let pages = run_batch(
        &payload.urls,
        &state.config,
        CaptureMode::PrintToPdf,
        &cancel,
    )
    .await;
    let page_artifacts = pages.successes;

    let merge_inputs = page_artifacts.clone();
    let merged = match spawn_pdf_work(move || merge_pdfs(&merge_inputs)).await {
        Ok(artifact) => artifact,
        Err(e) => {
            delete_all(&page_artifacts);
            return internal_error(&e.to_string());
        }
    };

    let link_source = merged.clone();
    let links = match spawn_pdf_work(move || extract_links(&link_source)).await {
        Ok(links) => links,
        Err(e) => {
            merged.delete();
            delete_all(&page_artifacts);
            return internal_error(&e.to_string());
        }
    };
    // The merged document only existed to be walked for links
    merged.delete();

    let csv = match write_links_csv(&links) {
        Ok(artifact) => artifact,
        Err(e) => {
            delete_all(&page_artifacts);
            return internal_error(&e.to_string());
        }
    };

    let linked_urls: Vec<String> = links.iter().map(|link| link.uri.clone()).collect();
    let linked = run_batch(
        &linked_urls,
        &state.config,
        CaptureMode::PrintToPdf,
        &cancel,
    )
    .await;

    let mut all_files = page_artifacts;
    all_files.extend(linked.successes);
    all_files.push(csv);

    let zip_inputs = all_files.clone();
    let archive = match spawn_pdf_work(move || crate::archive::build_zip(&zip_inputs)).await {
        Ok(artifact) => artifact,
        Err(e) => {
            delete_all(&all_files);
            return internal_error(&e.to_string());
        }
    };

    delete_all(&all_files);
    file_response(
        archive.clone(),
        "application/zip",
        Some(start.elapsed().as_secs_f64()),
        vec![archive],
    )
}

/// Run blocking PDF work off the async runtime.
async fn spawn_pdf_work<T, F>(work: F) -> Result<T, CaptureError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, CaptureError> + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result,
        Err(e) => Err(CaptureError::Encoding(format!("blocking task failed: {e}"))),
    }
}

/// Read an artifact into a file response, then schedule deletion of every
/// artifact the request produced. Deletion runs after the body has been
/// captured, so the response never races its own cleanup.
fn file_response(
    artifact: Artifact,
    content_type: &str,
    processing_time: Option<f64>,
    to_delete: Vec<Artifact>,
) -> Response {
    let bytes = match artifact.read() {
        Ok(bytes) => bytes,
        Err(e) => {
            delete_all(&to_delete);
            return internal_error(&e.to_string());
        }
    };
    let filename = artifact.file_name();

    tokio::task::spawn_blocking(move || delete_all(&to_delete));

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        );
    if let Some(secs) = processing_time {
        builder = builder.header("X-Processing-Time", secs.to_string());
    }

    match builder.body(Body::from(bytes)) {
        Ok(response) => response,
        Err(e) => internal_error(&format!("failed to build response: {e}")),
    }
}

/// 500 with the error message in a JSON `detail` field.
fn internal_error(detail: &str) -> Response {
    error!("request failed: {detail}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": detail })),
    )
        .into_response()
}
