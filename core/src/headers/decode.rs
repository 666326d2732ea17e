//! headers/decode.rs
//!
//! Header decoding from a byte source.
//!
//! Design notes:
//! - The version byte decides how many more bytes make up the header, so
//!   fields are read one at a time rather than as one fixed block.
//! - Each field read names the field on truncation.
//! - Every consumed byte is appended to the header's `raw` copy.

use std::io::Read;

use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;

use crate::constants::{extended, legacy, MAGIC_DBIN};
use crate::headers::types::{ExtendedHeader, FormatVersion, Header, HeaderError, HeaderField, HeaderKind, LegacyHeader};
use crate::types::StreamError;
use crate::utils::{read_exactly, ReadOutcome};

/// Read one header from `r`.
///
/// # Errors
/// - `MagicMismatch` / `UnsupportedFormatVersion` on malformed prefix.
/// - `TruncatedHeaderField` naming the field the source ran dry in.
/// - `InvalidContentVersionDigits` when the legacy version is not `00`..`99`.
/// - `Source` for I/O errors from `r`.
///
/// On error the source stays positioned right after the last byte consumed.
pub fn decode_header<R: Read + ?Sized>(r: &mut R) -> Result<Header, StreamError> {
    let mut raw = Vec::with_capacity(legacy::HEADER_LEN);

    let mut magic = [0u8; 4];
    read_field(r, &mut magic, HeaderField::Magic, &mut raw)?;
    if magic != MAGIC_DBIN {
        return Err(HeaderError::MagicMismatch { have: magic }.into());
    }

    let mut version = [0u8; 1];
    read_field(r, &mut version, HeaderField::FormatVersion, &mut raw)?;

    let kind = match FormatVersion::verify(version[0])? {
        FormatVersion::Legacy => HeaderKind::Legacy(decode_legacy(r, &mut raw)?),
        FormatVersion::Extended => HeaderKind::Extended(decode_extended(r, &mut raw)?),
    };

    Ok(Header::from_parts(kind, Bytes::from(raw)))
}

fn decode_legacy<R: Read + ?Sized>(r: &mut R, raw: &mut Vec<u8>) -> Result<LegacyHeader, StreamError> {
    let mut content_type = [0u8; legacy::CONTENT_TYPE_LEN];
    read_field(r, &mut content_type, HeaderField::ContentType, raw)?;

    let mut content_version = [0u8; legacy::CONTENT_VERSION_LEN];
    read_field(r, &mut content_version, HeaderField::ContentVersion, raw)?;
    if !content_version.iter().all(u8::is_ascii_digit) {
        return Err(HeaderError::InvalidContentVersionDigits { have: content_version }.into());
    }

    Ok(LegacyHeader { content_type, content_version })
}

fn decode_extended<R: Read + ?Sized>(r: &mut R, raw: &mut Vec<u8>) -> Result<ExtendedHeader, StreamError> {
    let mut len_buf = [0u8; extended::CONTENT_TYPE_LEN_FIELD];
    read_field(r, &mut len_buf, HeaderField::ContentTypeLength, raw)?;
    let len = BigEndian::read_u16(&len_buf) as usize;

    // Zero is a legal wire value; only writers are strict about it.
    let mut content_type = vec![0u8; len];
    read_field(r, &mut content_type, HeaderField::ContentType, raw)?;

    Ok(ExtendedHeader { content_type: Bytes::from(content_type) })
}

fn read_field<R: Read + ?Sized>(
    r: &mut R,
    buf: &mut [u8],
    field: HeaderField,
    raw: &mut Vec<u8>,
) -> Result<(), StreamError> {
    let outcome = read_exactly(r, buf).map_err(StreamError::Source)?;
    let actual = outcome.delivered(buf.len());
    raw.extend_from_slice(&buf[..actual]);

    match outcome {
        ReadOutcome::Full => Ok(()),
        ReadOutcome::Exhausted | ReadOutcome::Partial(_) => Err(HeaderError::TruncatedHeaderField {
            field,
            expected: buf.len(),
            actual,
        }
        .into()),
    }
}
