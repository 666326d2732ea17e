use std::io::Write;

use byteorder::{BigEndian, ByteOrder};

use crate::config::CodecConfig;
use crate::constants::MESSAGE_LEN_PREFIX;
use crate::framing::types::{FrameError, FramePart};
use crate::types::StreamError;
use crate::utils::{write_fully, WriteOutcome};

/// Canonical 4-byte big-endian length prefix for `len` payload bytes.
pub fn encode_length_prefix(len: usize, config: &CodecConfig) -> Result<[u8; MESSAGE_LEN_PREFIX], FrameError> {
    let max = config.message_limit();
    if len as u64 > max as u64 {
        return Err(FrameError::MessageTooLarge { len: len as u64, max });
    }

    let mut out = [0u8; MESSAGE_LEN_PREFIX];
    BigEndian::write_u32(&mut out, len as u32);
    Ok(out)
}

/// Write one message:
///
/// ```text
/// [ length u32 BE (4) ][ message (length) ]
/// ```
///
/// The length goes out first, then the body. A sink that stops short on
/// either is reported as `ShortWrite` for that part.
pub fn write_message<W: Write + ?Sized>(w: &mut W, msg: &[u8], config: &CodecConfig) -> Result<(), StreamError> {
    let prefix = encode_length_prefix(msg.len(), config)?;

    write_part(w, &prefix, FramePart::Length)?;
    write_part(w, msg, FramePart::Body)?;
    Ok(())
}

/// Write `buf` in full, mapping a short sink to `ShortWrite { part }`.
pub fn write_part<W: Write + ?Sized>(w: &mut W, buf: &[u8], part: FramePart) -> Result<(), StreamError> {
    match write_fully(w, buf).map_err(StreamError::Sink)? {
        WriteOutcome::Complete => Ok(()),
        WriteOutcome::Short { written } => Err(FrameError::ShortWrite {
            part,
            expected: buf.len(),
            written,
        }
        .into()),
    }
}
