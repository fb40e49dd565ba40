//! Zip archive assembly.
//!
//! Inputs are added under their base names; the directory structure is
//! dropped. When two inputs share a base name the later one wins, so the
//! archive never carries duplicate entries.

use std::fs::File;
use std::io::Write;

use tracing::{debug, info};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::artifact::Artifact;
use crate::error::{CaptureError, CaptureResult};

/// Collect the given files into a single compressed zip artifact.
pub fn build_zip(inputs: &[Artifact]) -> CaptureResult<Artifact> {
    // Base-name dedup, last-written wins
    let mut entries: Vec<(String, &Artifact)> = Vec::with_capacity(inputs.len());
    for input in inputs {
        let name = input.file_name();
        entries.retain(|(existing, _)| *existing != name);
        entries.push((name, input));
    }

    let out = Artifact::create("zip")?;
    let file = File::create(out.path()).map_err(|e| CaptureError::io(out.path(), e))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    for (name, input) in &entries {
        debug!(entry = %name, "adding archive entry");
        zip.start_file(name.as_str(), options)
            .map_err(|e| CaptureError::io(out.path(), std::io::Error::other(e)))?;
        let bytes = input.read()?;
        zip.write_all(&bytes)
            .map_err(|e| CaptureError::io(out.path(), e))?;
    }

    zip.finish()
        .map_err(|e| CaptureError::io(out.path(), std::io::Error::other(e)))?;

    info!(
        entries = entries.len(),
        path = %out.path().display(),
        "built archive"
    );
    Ok(out)
}
