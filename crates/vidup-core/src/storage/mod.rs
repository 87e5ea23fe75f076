//! Disk I/O and file lifecycle for uploads.
//!
//! Streams a source into an exclusively created file in fixed-size chunks,
//! enforces a byte ceiling, and removes the partial file on every failure path
//! (including cancellation of the writing future).

mod partial;
mod writer;

pub use partial::PartialFile;
pub use writer::write_bounded;

/// Default upload ceiling: 500 MiB.
pub const DEFAULT_LIMIT_BYTES: u64 = 500 * 1024 * 1024;

/// Default read/write chunk: 1 MiB.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Parameters for a bounded write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Maximum accepted payload. A payload of exactly this size is accepted.
    pub limit_bytes: u64,
    /// Size of the single reusable read buffer; bounds peak memory per upload.
    pub chunk_size: usize,
    /// fsync the file before reporting success.
    pub sync_on_complete: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            limit_bytes: DEFAULT_LIMIT_BYTES,
            chunk_size: DEFAULT_CHUNK_SIZE,
            sync_on_complete: true,
        }
    }
}
