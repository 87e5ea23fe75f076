//! Upload pipeline: resolve a free name under the upload root, then stream the
//! payload to it with a size ceiling.

use crate::error::UploadError;
use crate::naming::{self, TargetPath};
use crate::storage::{self, WriteOptions};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncRead;

/// Default number of re-resolutions after losing an exclusive-create race.
pub const DEFAULT_NAME_RETRIES: u32 = 3;

/// Outcome of a completed upload. Never produced for a partial file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResult {
    pub stored_name: String,
    pub size_bytes: u64,
}

/// Stores uploads as plain files in a single directory.
///
/// Holds no per-request state; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    options: WriteOptions,
    name_retries: u32,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>, options: WriteOptions) -> Self {
        Self {
            root: root.into(),
            options,
            name_retries: DEFAULT_NAME_RETRIES,
        }
    }

    pub fn with_name_retries(mut self, name_retries: u32) -> Self {
        self.name_retries = name_retries;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Creates the upload root (and parents) if missing.
    pub async fn ensure_root(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| UploadError::storage(&self.root, e))
    }

    /// Persists `source` under a name derived from `raw_name`.
    ///
    /// The upload root must exist (see [`UploadStore::ensure_root`]). If another
    /// request claims the resolved name before it is created, the name is
    /// resolved again, up to `name_retries` times.
    pub async fn store<R>(
        &self,
        source: &mut R,
        raw_name: Option<&str>,
    ) -> Result<UploadResult, UploadError>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let mut attempt = 0;
        loop {
            let target = self.resolve(raw_name).await?;
            match storage::write_bounded(source, target.path(), &self.options).await {
                Ok(size_bytes) => {
                    tracing::info!(
                        stored_name = target.file_name(),
                        size_bytes,
                        "upload stored"
                    );
                    return Ok(UploadResult {
                        stored_name: target.file_name().to_string(),
                        size_bytes,
                    });
                }
                Err(e) if e.is_name_taken() && attempt < self.name_retries => {
                    attempt += 1;
                    tracing::debug!(
                        name = target.file_name(),
                        attempt,
                        "resolved name claimed concurrently, resolving again"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn resolve(&self, raw_name: Option<&str>) -> Result<TargetPath, UploadError> {
        let root = self.root.clone();
        let raw_name = raw_name.map(str::to_owned);
        tokio::task::spawn_blocking(move || naming::resolve(raw_name.as_deref(), &root))
            .await
            .map_err(|e| UploadError::storage(&self.root, io::Error::other(e)))
    }
}
