//! RAII guard that removes an incomplete upload when dropped.

use std::path::{Path, PathBuf};

/// Owns the on-disk artifact of an in-progress write.
///
/// Unless [`PartialFile::commit`] is called, dropping the guard deletes the file.
/// Only construct it for a file this process just created.
#[derive(Debug)]
pub struct PartialFile {
    path: PathBuf,
    committed: bool,
}

impl PartialFile {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            committed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Marks the file complete; it is kept on drop.
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed partial upload"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove partial upload"
            ),
        }
    }
}
