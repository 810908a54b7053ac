//! Temporary file tracking
//!
//! Downloads and archives are written to temporary files that must be
//! removed exactly once, whatever way the run ends.

use std::path::PathBuf;

use tempfile::TempPath;

/// Temporary files owned by one upload run
#[derive(Debug, Default)]
pub struct TempResources {
    paths: Vec<TempPath>,
}

impl TempResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a temporary file and return its location
    pub fn track(&mut self, path: TempPath) -> PathBuf {
        tracing::debug!(path = %path.display(), "Tracking temporary file");
        let location = path.to_path_buf();
        self.paths.push(path);
        location
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Delete every tracked file, returning how many were removed
    ///
    /// Failures are logged and otherwise ignored so they never mask the
    /// outcome of the run.
    pub fn release_all(&mut self) -> usize {
        let mut removed = 0;
        for path in self.paths.drain(..) {
            let shown = path.display().to_string();
            match path.close() {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %shown, error = %e, "Failed to remove temporary file");
                }
            }
        }
        removed
    }
}

impl Drop for TempResources {
    fn drop(&mut self) {
        self.release_all();
    }
}
