//! Integration tests: bounded streaming writes through the public API.
//!
//! Covers exact-limit acceptance, one-byte-over rejection, mid-stream source
//! failure, and byte-for-byte round trips around chunk boundaries.

mod common;

use common::readers::{pattern, FailingReader, PatternReader};
use tempfile::tempdir;
use vidup_core::storage::{write_bounded, WriteOptions};
use vidup_core::{ErrorKind, UploadError, UploadStore};

const CHUNK: usize = 1024;
const LIMIT: u64 = 8 * CHUNK as u64;

fn opts() -> WriteOptions {
    WriteOptions {
        limit_bytes: LIMIT,
        chunk_size: CHUNK,
        sync_on_complete: false,
    }
}

#[tokio::test]
async fn exactly_limit_is_accepted_and_byte_identical() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("exact.bin");
    let mut src = PatternReader::new(LIMIT, CHUNK);

    let n = write_bounded(&mut src, &target, &opts()).await.unwrap();
    assert_eq!(n, LIMIT);
    let stored = std::fs::read(&target).unwrap();
    assert_eq!(stored.len() as u64, LIMIT);
    assert_eq!(stored, pattern(LIMIT as usize));
}

#[tokio::test]
async fn one_byte_over_is_rejected_and_cleaned_up() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("over.bin");
    let mut src = PatternReader::new(LIMIT + 1, CHUNK);

    let err = write_bounded(&mut src, &target, &opts()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PayloadTooLarge);
    assert!(matches!(err, UploadError::PayloadTooLarge { limit: LIMIT }));
    assert!(!target.exists(), "partial file must be removed");
}

#[tokio::test]
async fn oversized_stream_stops_reading_promptly() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("huge.bin");
    let mut src = PatternReader::new(100 * LIMIT, CHUNK);

    let err = write_bounded(&mut src, &target, &opts()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PayloadTooLarge);
    assert!(src.consumed() <= LIMIT + CHUNK as u64);
    assert!(!target.exists());
}

#[tokio::test]
async fn source_failure_is_storage_error_and_cleaned_up() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("broken.bin");
    let mut src = FailingReader::new(3 * CHUNK + 17);

    let err = write_bounded(&mut src, &target, &opts()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StorageError);
    let source = std::error::Error::source(&err).expect("wrapped cause");
    assert!(source.to_string().contains("client disconnected"));
    assert!(!target.exists(), "partial file must be removed");
}

#[tokio::test]
async fn round_trip_sizes_around_chunk_boundary() {
    let dir = tempdir().unwrap();
    let sizes = [
        0,
        1,
        CHUNK - 1,
        CHUNK,
        CHUNK + 1,
        LIMIT as usize,
    ];
    for (i, size) in sizes.into_iter().enumerate() {
        let target = dir.path().join(format!("rt_{i}.bin"));
        let data = pattern(size);
        let mut src: &[u8] = &data;

        let n = write_bounded(&mut src, &target, &opts()).await.unwrap();
        assert_eq!(n, size as u64, "size {size}");
        assert_eq!(std::fs::read(&target).unwrap(), data, "size {size}");
    }
}

#[tokio::test]
async fn uneven_reads_are_counted_correctly() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("uneven.bin");
    // 7-byte reads never align with the chunk size.
    let mut src = PatternReader::new(LIMIT, 7);

    let n = write_bounded(&mut src, &target, &opts()).await.unwrap();
    assert_eq!(n, LIMIT);
    assert_eq!(std::fs::read(&target).unwrap(), pattern(LIMIT as usize));
}

#[tokio::test]
async fn cancelled_write_leaves_no_file() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("cancelled.bin");

    // A source that never finishes: the write future is dropped mid-stream.
    let (mut client, mut server) = tokio::io::duplex(64);
    tokio::io::AsyncWriteExt::write_all(&mut client, b"first bytes").await.unwrap();

    let options = opts();
    let write = write_bounded(&mut server, &target, &options);
    let timed_out = tokio::time::timeout(std::time::Duration::from_millis(100), write).await;
    assert!(timed_out.is_err(), "write should still be pending");
    drop(client);
    assert!(!target.exists(), "dropped write must remove its file");
}

#[tokio::test]
async fn concurrent_same_name_uploads_never_overwrite() {
    let dir = tempdir().unwrap();
    let store = std::sync::Arc::new(UploadStore::new(dir.path(), opts()));

    let mut handles = Vec::new();
    for i in 0..8u8 {
        let store = std::sync::Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            let body = vec![i; 100];
            let mut src: &[u8] = &body;
            store.store(&mut src, Some("clip.mp4")).await
        }));
    }

    let mut stored = Vec::new();
    for h in handles {
        match h.await.unwrap() {
            Ok(r) => stored.push(r),
            Err(e) => assert_eq!(e.kind(), ErrorKind::StorageError),
        }
    }
    assert!(!stored.is_empty());
    let mut names: Vec<_> = stored.iter().map(|r| r.stored_name.clone()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), stored.len(), "every success has its own file");
    for r in &stored {
        let content = std::fs::read(dir.path().join(&r.stored_name)).unwrap();
        assert_eq!(content.len(), 100);
        assert!(content.iter().all(|&b| b == content[0]));
    }
}
