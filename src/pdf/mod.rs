//! PDF assembly: merging rendered documents and walking link annotations.
//!
//! Built on pdfium. The library is bound per call — a copy next to the
//! executable wins, otherwise the system library is used — and all work in
//! this module is synchronous and blocking; async callers go through
//! `tokio::task::spawn_blocking`.

mod links;
mod merge;

pub use links::{PageLink, extract_links, write_links_csv};
pub use merge::merge_pdfs;

use anyhow::Result;
use pdfium_render::prelude::*;

/// Bind to a pdfium library: cwd first, then the system paths.
pub(crate) fn bind_pdfium() -> Result<Pdfium> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| anyhow::anyhow!("failed to bind pdfium library: {e:?}"))?;
    Ok(Pdfium::new(bindings))
}
