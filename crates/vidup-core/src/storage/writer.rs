//! Bounded streaming writer.

use super::{PartialFile, WriteOptions};
use crate::error::UploadError;
use std::future::Future;
use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Streams `source` into a newly created file at `target`, one chunk at a time.
///
/// The target is opened with create-new semantics, so an existing file is never
/// overwritten; that case surfaces as a storage error whose cause is
/// `AlreadyExists` (no bytes have been read from `source` at that point).
///
/// Fails with [`UploadError::PayloadTooLarge`] as soon as the running total
/// exceeds `opts.limit_bytes`; the chunk that crossed the limit is not written.
/// Read, write, flush and sync failures become [`UploadError::Storage`]. On any
/// error, and if this future is dropped before completing, the file is removed.
///
/// The source is only borrowed; its position after an error is unspecified.
pub async fn write_bounded<R>(
    source: &mut R,
    target: &Path,
    opts: &WriteOptions,
) -> Result<u64, UploadError>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let file = File::options()
        .write(true)
        .create_new(true)
        .open(target)
        .await
        .map_err(|e| UploadError::storage(target, e))?;
    stream_into(source, file, target, opts).await
}

/// Destination of an upload stream.
trait UploadSink: AsyncWrite + Unpin {
    /// Makes written data durable.
    fn sync(&mut self) -> impl Future<Output = io::Result<()>> + Send + '_;
}

impl UploadSink for File {
    fn sync(&mut self) -> impl Future<Output = io::Result<()>> + Send + '_ {
        self.sync_all()
    }
}

/// Copies into `sink`, which was just created at `target`. The file at `target`
/// is removed unless the copy completes.
async fn stream_into<R, W>(
    source: &mut R,
    mut sink: W,
    target: &Path,
    opts: &WriteOptions,
) -> Result<u64, UploadError>
where
    R: AsyncRead + Unpin + ?Sized,
    W: UploadSink,
{
    let partial = PartialFile::new(target);

    let result = copy_chunks(source, &mut sink, partial.path(), opts).await;
    drop(sink);

    match result {
        Ok(total) => {
            partial.commit();
            Ok(total)
        }
        Err(e) => Err(e),
    }
}

async fn copy_chunks<R, W>(
    source: &mut R,
    sink: &mut W,
    target: &Path,
    opts: &WriteOptions,
) -> Result<u64, UploadError>
where
    R: AsyncRead + Unpin + ?Sized,
    W: UploadSink,
{
    let mut buf = vec![0u8; opts.chunk_size.max(1)];
    let mut total: u64 = 0;

    loop {
        let n = match source.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::debug!(path = %target.display(), received = total, error = %e, "source read failed");
                return Err(UploadError::storage(target, e));
            }
        };

        total = total.saturating_add(n as u64);
        if total > opts.limit_bytes {
            tracing::warn!(
                path = %target.display(),
                limit = opts.limit_bytes,
                "upload exceeded size limit"
            );
            return Err(UploadError::PayloadTooLarge {
                limit: opts.limit_bytes,
            });
        }

        sink.write_all(&buf[..n])
            .await
            .map_err(|e| UploadError::storage(target, e))?;
    }

    sink.flush()
        .await
        .map_err(|e| UploadError::storage(target, e))?;
    if opts.sync_on_complete {
        sink.sync()
            .await
            .map_err(|e| UploadError::storage(target, e))?;
    }
    Ok(total)
}
