//! utils.rs
//! Byte-channel primitives shared by the header and message paths.
//!
//! Every read in this crate goes through [`read_exactly`] (or its growing
//! variant [`read_exactly_vec`]) and every write through [`write_fully`].
//! Partial deliveries, `Interrupted` retries and the distinction between
//! "nothing left" and "cut short" are handled here and nowhere else.

use std::io::{ErrorKind, Read, Write};

/// How a fixed-size read against a byte source ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Every requested byte was delivered.
    Full,
    /// The source was exhausted before delivering a single byte.
    Exhausted,
    /// The source was exhausted after delivering this many bytes (`0 < n < len`).
    Partial(usize),
}

impl ReadOutcome {
    /// Bytes actually delivered for a request of `requested` bytes.
    pub fn delivered(self, requested: usize) -> usize {
        match self {
            ReadOutcome::Full => requested,
            ReadOutcome::Exhausted => 0,
            ReadOutcome::Partial(n) => n,
        }
    }
}

/// How a write against a byte sink ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Complete,
    /// The sink accepted `written` bytes and then refused more (`Ok(0)`).
    Short { written: usize },
}

/// Fill `buf` from `r`, looping over short reads until it is full or the
/// source reports exhaustion (`Ok(0)`).
///
/// `Interrupted` is retried; any other error is returned as-is and the
/// source is left positioned after whatever was already consumed.
pub fn read_exactly<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> std::io::Result<ReadOutcome> {
    let mut off = 0;

    while off < buf.len() {
        match r.read(&mut buf[off..]) {
            Ok(0) => break,
            Ok(n) => off += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(if off == buf.len() {
        ReadOutcome::Full
    } else if off == 0 {
        ReadOutcome::Exhausted
    } else {
        ReadOutcome::Partial(off)
    })
}

/// Like [`read_exactly`], but reads `len` bytes into a fresh vector that
/// grows by at most `chunk` bytes per step.
///
/// The length comes off the wire, so it is not trusted for an up-front
/// allocation. On `Exhausted`/`Partial` the returned vector holds exactly
/// the bytes delivered.
pub fn read_exactly_vec<R: Read + ?Sized>(
    r: &mut R,
    len: usize,
    chunk: usize,
) -> std::io::Result<(Vec<u8>, ReadOutcome)> {
    let chunk = chunk.max(1);
    let mut buf = Vec::with_capacity(len.min(chunk));

    while buf.len() < len {
        let start = buf.len();
        let step = (len - start).min(chunk);
        buf.resize(start + step, 0);

        match read_exactly(r, &mut buf[start..])? {
            ReadOutcome::Full => {}
            ReadOutcome::Exhausted => {
                buf.truncate(start);
                break;
            }
            ReadOutcome::Partial(n) => {
                buf.truncate(start + n);
                break;
            }
        }
    }

    let outcome = if buf.len() == len {
        ReadOutcome::Full
    } else if buf.is_empty() {
        ReadOutcome::Exhausted
    } else {
        ReadOutcome::Partial(buf.len())
    };
    Ok((buf, outcome))
}

/// Push all of `buf` into `w`.
///
/// A sink is expected to take everything or fail. Partial writes are
/// continued, but a sink that accepts zero bytes of a non-empty remainder
/// yields [`WriteOutcome::Short`] instead of spinning.
pub fn write_fully<W: Write + ?Sized>(w: &mut W, buf: &[u8]) -> std::io::Result<WriteOutcome> {
    let mut off = 0;

    while off < buf.len() {
        match w.write(&buf[off..]) {
            Ok(0) => return Ok(WriteOutcome::Short { written: off }),
            Ok(n) => off += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(WriteOutcome::Complete)
}

/// Render bytes for diagnostics: a `b"..."` literal when printable ASCII,
/// hex otherwise.
pub fn fmt_bytes(b: &[u8]) -> String {
    if b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}
