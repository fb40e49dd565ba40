//! Extracted-text to paginated PDF encoding.
//!
//! The text snapshot is sanitised to Latin-1 (anything outside the range
//! becomes `?`, lossy by design) and laid out as a fixed-margin monospace
//! document. Layout and pagination are delegated to printpdf's HTML
//! renderer; the HTML produced here is deliberately minimal so the
//! renderer has nothing to trip over.

use std::collections::BTreeMap;

use printpdf::{GeneratePdfOptions, PdfDocument};
use tracing::{debug, warn};

use crate::artifact::Artifact;
use crate::error::{CaptureError, CaptureResult};

/// Replacement for characters outside the Latin-1 range.
const REPLACEMENT: char = '?';

/// Replace every character outside Latin-1 with [`REPLACEMENT`].
///
/// Control characters other than newlines are dropped; they carry no
/// visible text and upset the layout engine.
#[must_use]
pub fn to_latin1_lossy(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            c if c.is_control() => None,
            c if (c as u32) <= 0xFF => Some(c),
            _ => Some(REPLACEMENT),
        })
        .collect()
}

/// Wrap sanitised text in the minimal HTML document printpdf lays out:
/// one paragraph per blank-line-separated block, monospace, fixed margins.
fn text_as_html(text: &str) -> String {
    let mut html = String::with_capacity(text.len() + 256);
    html.push_str(
        "<!DOCTYPE html><html><head><style>\
         body { font-family: monospace; font-size: 12px; margin: 15mm; }\
         </style></head><body>",
    );
    for block in text.split("\n\n") {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }
        html.push_str("<p>");
        html.push_str(&html_escape::encode_text(block));
        html.push_str("</p>");
    }
    html.push_str("</body></html>");
    html
}

/// Encode extracted text as a paginated PDF artifact.
///
/// Fails with [`CaptureError::Encoding`] only when the document cannot be
/// laid out or serialised; unencodable characters are replaced, never an
/// error.
pub fn text_to_pdf(text: &str) -> CaptureResult<Artifact> {
    let sanitized = to_latin1_lossy(text);
    let html = text_as_html(&sanitized);

    let mut warnings = Vec::new();
    let document = PdfDocument::from_html(
        &html,
        &BTreeMap::new(),
        &BTreeMap::new(),
        &GeneratePdfOptions::default(),
        &mut warnings,
    )
    .map_err(|e| CaptureError::Encoding(format!("failed to lay out document: {e}")))?;

    if !warnings.is_empty() {
        warn!(count = warnings.len(), "text-to-PDF layout warnings: {warnings:?}");
    }

    let bytes = document.save(&Default::default(), &mut warnings);

    debug!(chars = sanitized.len(), size = bytes.len(), "encoded text PDF");
    Artifact::from_bytes("pdf", &bytes)
}
