use std::io::Read;

use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;

use crate::config::CodecConfig;
use crate::constants::MESSAGE_LEN_PREFIX;
use crate::framing::types::FrameError;
use crate::types::StreamError;
use crate::utils::{read_exactly, read_exactly_vec, ReadOutcome};

/// Read the next length prefix.
///
/// `Ok(None)` when the source is exhausted exactly on a message boundary.
pub fn read_length_prefix<R: Read + ?Sized>(r: &mut R) -> Result<Option<u32>, StreamError> {
    let mut buf = [0u8; MESSAGE_LEN_PREFIX];

    match read_exactly(r, &mut buf).map_err(StreamError::Source)? {
        ReadOutcome::Full => Ok(Some(BigEndian::read_u32(&buf))),
        ReadOutcome::Exhausted => Ok(None),
        ReadOutcome::Partial(actual) => Err(FrameError::TruncatedLength { actual }.into()),
    }
}

/// Read one length-prefixed message.
///
/// Returns:
/// - `Ok(Some(bytes))` for a complete message (possibly empty).
/// - `Ok(None)` at end of stream: nothing after the previous message, or a
///   length prefix with nothing at all behind it.
/// - `TruncatedLength` / `TruncatedMessage` when the source ends mid-record.
pub fn read_message<R: Read + ?Sized>(r: &mut R, config: &CodecConfig) -> Result<Option<Bytes>, StreamError> {
    let len = match read_length_prefix(r)? {
        Some(len) => len,
        None => return Ok(None),
    };

    if len == 0 {
        return Ok(Some(Bytes::new()));
    }

    let max = config.message_limit();
    if len > max {
        return Err(FrameError::MessageTooLarge { len: len as u64, max }.into());
    }

    let (body, outcome) = read_exactly_vec(r, len as usize, config.read_chunk_size)
        .map_err(StreamError::Source)?;

    match outcome {
        ReadOutcome::Full => Ok(Some(Bytes::from(body))),
        ReadOutcome::Exhausted => Ok(None),
        ReadOutcome::Partial(actual) => Err(FrameError::TruncatedMessage { expected: len, actual }.into()),
    }
}
