//! Upload error taxonomy.

use std::io;
use std::path::PathBuf;

/// Coarse classification the transport layer maps to a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The stream exceeded the configured ceiling. Client-recoverable, never retried.
    PayloadTooLarge,
    /// Directory unavailable, disk I/O failure, source-stream failure, or a lost
    /// exclusive-create race.
    StorageError,
}

/// Error returned by the upload store and the bounded writer.
///
/// On any variant the writer has already removed its partial file.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("payload exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: u64 },

    #[error("storage failure at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl UploadError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        UploadError::Storage {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            UploadError::PayloadTooLarge { .. } => ErrorKind::PayloadTooLarge,
            UploadError::Storage { .. } => ErrorKind::StorageError,
        }
    }

    /// True when exclusive creation found the target already present, i.e. another
    /// request claimed the resolved name between resolution and open.
    pub fn is_name_taken(&self) -> bool {
        matches!(
            self,
            UploadError::Storage { source, .. } if source.kind() == io::ErrorKind::AlreadyExists
        )
    }
}
