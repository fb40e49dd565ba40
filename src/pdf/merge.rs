//! Ordered concatenation of PDF documents.

use pdfium_render::prelude::*;
use tracing::{debug, info};

use super::bind_pdfium;
use crate::artifact::Artifact;
use crate::error::{CaptureError, CaptureResult};

/// Concatenate the given documents, in list order, into a new artifact.
///
/// Any unreadable or invalid input aborts the whole merge with
/// [`CaptureError::Merge`]; no partial merge is produced. An empty input
/// list is also a merge error. A single input is copied through verbatim
/// (after validation), so merging one document is byte-stable.
pub fn merge_pdfs(inputs: &[Artifact]) -> CaptureResult<Artifact> {
    if inputs.is_empty() {
        return Err(CaptureError::Merge("no input documents".into()));
    }

    let pdfium = bind_pdfium().map_err(|e| CaptureError::Merge(format!("{e:#}")))?;

    if let [only] = inputs {
        // Validate, then copy bytes untouched
        pdfium
            .load_pdf_from_file(only.path(), None)
            .map_err(|e| merge_input_error(only, &e))?;
        let bytes = only.read()?;
        let out = Artifact::from_bytes("pdf", &bytes)?;
        debug!(path = %out.path().display(), "single-input merge copied through");
        return Ok(out);
    }

    let mut merged = pdfium
        .create_new_pdf()
        .map_err(|e| CaptureError::Merge(format!("failed to create output document: {e:?}")))?;

    for input in inputs {
        let source = pdfium
            .load_pdf_from_file(input.path(), None)
            .map_err(|e| merge_input_error(input, &e))?;
        merged
            .pages_mut()
            .append(&source)
            .map_err(|e| merge_input_error(input, &e))?;
    }

    let out = Artifact::create("pdf")?;
    merged
        .save_to_file(out.path())
        .map_err(|e| CaptureError::Merge(format!("failed to write merged document: {e:?}")))?;

    info!(
        inputs = inputs.len(),
        path = %out.path().display(),
        "merged documents"
    );
    Ok(out)
}

fn merge_input_error(input: &Artifact, err: &PdfiumError) -> CaptureError {
    CaptureError::Merge(format!(
        "invalid or unreadable input '{}': {err:?}",
        input.path().display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_list_is_a_merge_error() {
        let err = merge_pdfs(&[]).unwrap_err();
        assert!(matches!(err, CaptureError::Merge(_)));
        assert!(err.to_string().contains("no input documents"));
    }

    #[test]
    #[ignore = "requires a pdfium library on the host"]
    fn single_document_merge_is_byte_identical() {
        let artifact = crate::textpdf::text_to_pdf("merge me").unwrap();
        let merged = merge_pdfs(std::slice::from_ref(&artifact)).unwrap();
        assert_eq!(artifact.read().unwrap(), merged.read().unwrap());
        artifact.delete();
        merged.delete();
    }

    #[test]
    #[ignore = "requires a pdfium library on the host"]
    fn invalid_document_aborts_the_merge() {
        let good = crate::textpdf::text_to_pdf("fine").unwrap();
        let bad = Artifact::from_bytes("pdf", b"this is not a pdf").unwrap();
        let err = merge_pdfs(&[good.clone(), bad.clone()]).unwrap_err();
        assert!(matches!(err, CaptureError::Merge(_)));
        good.delete();
        bad.delete();
    }
}
