//! Transient file artifacts.
//!
//! Every rendered PDF, CSV side-file, and zip produced by the pipeline is
//! backed by a uniquely-named file in the process temp directory. Artifacts
//! are owned by the task that produced them until consumed by a merge,
//! archive, or HTTP response, and deletion is explicit and caller-driven: a
//! crash before cleanup leaks the file, which is accepted.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{CaptureError, CaptureResult};

/// A transient output file in the process temp namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    path: PathBuf,
}

impl Artifact {
    /// Create an empty artifact file with the given extension (e.g. `"pdf"`).
    ///
    /// The file is created eagerly so the unique name is reserved; it is NOT
    /// deleted on drop.
    pub fn create(extension: &str) -> CaptureResult<Self> {
        let file = tempfile::Builder::new()
            .prefix("pagepress_")
            .suffix(&format!(".{extension}"))
            .tempfile()
            .map_err(|e| CaptureError::io(std::env::temp_dir(), e))?;
        // keep() detaches the file from tempfile's auto-delete
        let (_, path) = file
            .keep()
            .map_err(|e| CaptureError::io(e.file.path().to_path_buf(), e.error))?;
        debug!(path = %path.display(), "created artifact");
        Ok(Self { path })
    }

    /// Create an artifact holding the given bytes.
    pub fn from_bytes(extension: &str, bytes: &[u8]) -> CaptureResult<Self> {
        let artifact = Self::create(extension)?;
        std::fs::write(&artifact.path, bytes)
            .map_err(|e| CaptureError::io(artifact.path.clone(), e))?;
        Ok(artifact)
    }

    /// Wrap an existing file as an artifact.
    pub fn from_path(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name of the backing file, used for archive entries and
    /// Content-Disposition filenames.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "artifact".to_string())
    }

    /// Read the artifact's bytes.
    pub fn read(&self) -> CaptureResult<Vec<u8>> {
        std::fs::read(&self.path).map_err(|e| CaptureError::io(self.path.clone(), e))
    }

    /// Delete the backing file. Failures are logged, never surfaced.
    pub fn delete(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "deleted artifact"),
            Err(e) => warn!(path = %self.path.display(), "failed to delete artifact: {e}"),
        }
    }
}

/// Delete a batch of artifacts, logging each failure independently.
pub fn delete_all(artifacts: &[Artifact]) {
    for artifact in artifacts {
        artifact.delete();
    }
}
