// Shared byte-source / byte-sink doubles for the integration suites.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, Read, Write};

/// Legacy header used across suites: `dbin 0x00 ETH 98`.
pub const LEGACY_ETH_98: [u8; 10] = [b'd', b'b', b'i', b'n', 0x00, b'E', b'T', b'H', b'9', b'8'];

/// Delivers bytes in the given fragments, one fragment (or less) per
/// `read` call, then reports exhaustion.
pub struct ChunkedReader {
    chunks: VecDeque<Vec<u8>>,
}

impl ChunkedReader {
    pub fn new<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        let chunks = chunks
            .into_iter()
            .map(|c| c.as_ref().to_vec())
            .filter(|c| !c.is_empty())
            .collect();
        Self { chunks }
    }

    pub fn one_byte_at_a_time(data: &[u8]) -> Self {
        Self::new(data.iter().map(|b| [*b]))
    }

    pub fn fragments(data: &[u8], size: usize) -> Self {
        Self::new(data.chunks(size.max(1)))
    }

    pub fn remaining(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(mut chunk) = self.chunks.pop_front() else {
            return Ok(0);
        };
        let n = buf.len().min(chunk.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            chunk.drain(..n);
            self.chunks.push_front(chunk);
        }
        Ok(n)
    }
}

/// Delivers `data`, then fails every later read.
pub struct FailingReader {
    data: io::Cursor<Vec<u8>>,
}

impl FailingReader {
    pub fn new(data: &[u8]) -> Self {
        Self { data: io::Cursor::new(data.to_vec()) }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "source went away")),
            n => Ok(n),
        }
    }
}

/// Accepts at most `capacity` bytes in total, then returns `Ok(0)`.
#[derive(Default)]
pub struct ShortSink {
    pub written: Vec<u8>,
    pub capacity: usize,
}

impl ShortSink {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { written: Vec::new(), capacity }
    }
}

impl Write for ShortSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = self.capacity - self.written.len();
        let n = room.min(buf.len());
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Every write and flush fails.
pub struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }
}

/// Counts `flush` calls.
#[derive(Default)]
pub struct FlushCounter {
    pub bytes: Vec<u8>,
    pub flushes: usize,
}

impl Write for FlushCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Install a test logger once; output only shows with `RUST_LOG` set.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
