//! Outbound hyperlink extraction from a rendered PDF.

use pdfium_render::prelude::*;
use tracing::{debug, trace};

use super::bind_pdfium;
use crate::artifact::Artifact;
use crate::error::{CaptureError, CaptureResult};

/// One outbound hyperlink: 1-based source page plus target URI.
///
/// Duplicates are preserved and URIs are not normalized; the pair value is
/// the link's whole identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub page_num: u32,
    pub uri: String,
}

/// Walk the document's pages in index order and collect every link
/// annotation whose target is a URI, in stored order.
///
/// Internal links (go-to destinations, named actions) are skipped.
pub fn extract_links(pdf: &Artifact) -> CaptureResult<Vec<PageLink>> {
    let pdfium = bind_pdfium().map_err(|e| CaptureError::LinkExtraction(format!("{e:#}")))?;
    let document = pdfium
        .load_pdf_from_file(pdf.path(), None)
        .map_err(|e| {
            CaptureError::LinkExtraction(format!(
                "invalid or unreadable document '{}': {e:?}",
                pdf.path().display()
            ))
        })?;

    let mut links = Vec::new();
    for (index, page) in document.pages().iter().enumerate() {
        for link in page.links().iter() {
            match link.action() {
                Some(PdfAction::Uri(action)) => match action.uri() {
                    Ok(uri) => links.push(PageLink {
                        page_num: index as u32 + 1,
                        uri,
                    }),
                    Err(e) => trace!(page = index + 1, "unreadable URI action: {e:?}"),
                },
                // Internal and unsupported actions are not outbound links
                Some(_) | None => {}
            }
        }
    }

    debug!(count = links.len(), "extracted links");
    Ok(links)
}

/// Write links as a `page_num,uri` CSV side-file artifact.
pub fn write_links_csv(links: &[PageLink]) -> CaptureResult<Artifact> {
    let mut output = String::from("page_num,uri\n");
    for link in links {
        output.push_str(&format!("{},{}\n", link.page_num, escape_csv(&link.uri)));
    }
    Artifact::from_bytes("csv", output.as_bytes())
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
