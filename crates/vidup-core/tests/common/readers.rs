//! Deterministic byte sources for writer tests.
//!
//! `PatternReader` yields a repeating byte pattern and counts what was consumed;
//! `FailingReader` yields some bytes and then reports a dropped connection.

#![allow(dead_code)]

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};

/// Byte `i` of the test pattern.
pub fn pattern_byte(i: u64) -> u8 {
    (i % 251) as u8
}

pub fn pattern(len: usize) -> Vec<u8> {
    (0..len as u64).map(pattern_byte).collect()
}

/// Yields `len` pattern bytes, at most `max_read` per poll.
pub struct PatternReader {
    len: u64,
    pos: u64,
    max_read: usize,
}

impl PatternReader {
    pub fn new(len: u64, max_read: usize) -> Self {
        Self {
            len,
            pos: 0,
            max_read,
        }
    }

    /// Bytes handed out so far.
    pub fn consumed(&self) -> u64 {
        self.pos
    }
}

impl AsyncRead for PatternReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let left = (self.len - self.pos) as usize;
        let n = left.min(buf.remaining()).min(self.max_read);
        for _ in 0..n {
            let b = pattern_byte(self.pos);
            buf.put_slice(&[b]);
            self.pos += 1;
        }
        Poll::Ready(Ok(()))
    }
}

/// Yields `ok_bytes` bytes, then fails every read with `ConnectionReset`.
pub struct FailingReader {
    remaining: usize,
}

impl FailingReader {
    pub fn new(ok_bytes: usize) -> Self {
        Self {
            remaining: ok_bytes,
        }
    }
}

impl AsyncRead for FailingReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if self.remaining == 0 {
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "client disconnected",
            )));
        }
        let n = self.remaining.min(buf.remaining());
        buf.put_slice(&vec![0xAB; n]);
        self.remaining -= n;
        Poll::Ready(Ok(()))
    }
}
