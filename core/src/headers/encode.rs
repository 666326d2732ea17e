//! headers/encode.rs
//!
//! Header construction and serialization.
//!
//! Design notes:
//! - Validation happens when a `Header` is built, so every `Header` value
//!   is encodable and its `raw` bytes are computed exactly once.
//! - Lengths are byte lengths: multi-byte UTF-8 counts per byte.

use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;

use crate::config::CodecConfig;
use crate::constants::{extended, legacy, MAGIC_DBIN};
use crate::headers::types::{ExtendedHeader, FormatVersion, Header, HeaderError, HeaderKind, LegacyHeader};

impl Header {
    /// Format version 0 header: exactly 3 content-type bytes and a content
    /// version in `0..=99`, written as two zero-padded digits.
    pub fn legacy(content_type: impl AsRef<[u8]>, content_version: i32) -> Result<Self, HeaderError> {
        let body = validate_legacy(content_type.as_ref(), content_version)?;
        Ok(Self::from_kind(HeaderKind::Legacy(body)))
    }

    /// Format version 1 header under the default (strict) config.
    pub fn extended(content_type: impl AsRef<[u8]>) -> Result<Self, HeaderError> {
        Self::extended_with(content_type, &CodecConfig::default())
    }

    /// Format version 1 header; `config.allow_empty_content_type` admits
    /// the zero-length content type older producers wrote.
    pub fn extended_with(content_type: impl AsRef<[u8]>, config: &CodecConfig) -> Result<Self, HeaderError> {
        let body = validate_extended(content_type.as_ref(), config.allow_empty_content_type)?;
        Ok(Self::from_kind(HeaderKind::Extended(body)))
    }

    fn from_kind(kind: HeaderKind) -> Self {
        let raw = encode_header(&kind);
        Self::from_parts(kind, raw)
    }
}

pub fn validate_legacy(content_type: &[u8], content_version: i32) -> Result<LegacyHeader, HeaderError> {
    let ct: [u8; legacy::CONTENT_TYPE_LEN] = content_type.try_into().map_err(|_| HeaderError::InvalidContentType {
        format_version: FormatVersion::Legacy,
        len: content_type.len(),
        expected: "exactly 3 bytes",
    })?;

    if !(0..=legacy::MAX_CONTENT_VERSION).contains(&content_version) {
        return Err(HeaderError::InvalidContentVersion { have: content_version });
    }
    let v = content_version as u8;

    Ok(LegacyHeader {
        content_type: ct,
        content_version: [b'0' + v / 10, b'0' + v % 10],
    })
}

pub fn validate_extended(content_type: &[u8], allow_empty: bool) -> Result<ExtendedHeader, HeaderError> {
    let len = content_type.len();
    let min = if allow_empty { 0 } else { 1 };

    if len < min || len > extended::MAX_CONTENT_TYPE_LEN {
        return Err(HeaderError::InvalidContentType {
            format_version: FormatVersion::Extended,
            len,
            expected: if allow_empty { "at most 65535 bytes" } else { "1 to 65535 bytes" },
        });
    }

    Ok(ExtendedHeader { content_type: Bytes::copy_from_slice(content_type) })
}

/// Serialize a validated header body, prefix included.
///
/// Layout:
///
/// ```text
/// [ magic "dbin" (4) ][ version (1) ]
/// v0: [ content_type (3) ][ content_version digits (2) ]
/// v1: [ content_type_len u16 BE (2) ][ content_type (n) ]
/// ```
pub fn encode_header(kind: &HeaderKind) -> Bytes {
    let mut out = Vec::with_capacity(match kind {
        HeaderKind::Legacy(_) => legacy::HEADER_LEN,
        HeaderKind::Extended(h) => extended::FIXED_LEN + h.content_type.len(),
    });

    out.extend_from_slice(&MAGIC_DBIN);
    out.push(kind.format_version().as_u8());

    match kind {
        HeaderKind::Legacy(h) => {
            out.extend_from_slice(&h.content_type);
            out.extend_from_slice(&h.content_version);
        }
        HeaderKind::Extended(h) => {
            let mut len = [0u8; extended::CONTENT_TYPE_LEN_FIELD];
            // validate_extended bounds the length to u16.
            BigEndian::write_u16(&mut len, h.content_type.len() as u16);
            out.extend_from_slice(&len);
            out.extend_from_slice(&h.content_type);
        }
    }

    Bytes::from(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_layout_is_ten_bytes() {
        let h = Header::legacy("ETH", 98).unwrap();
        assert_eq!(h.raw_bytes(), b"dbin\x00ETH98");
        assert_eq!(h.encoded_len(), legacy::HEADER_LEN);
    }

    #[test]
    fn extended_layout_carries_u16_length() {
        let h = Header::extended("eth").unwrap();
        assert_eq!(h.raw_bytes(), &[b'd', b'b', b'i', b'n', 0x01, 0x00, 0x03, b'e', b't', b'h']);
    }

    #[test]
    fn extended_empty_only_in_compat_mode() {
        assert!(matches!(
            Header::extended(""),
            Err(HeaderError::InvalidContentType { len: 0, .. })
        ));

        let compat = CodecConfig::compat();
        let h = Header::extended_with("", &compat).unwrap();
        assert_eq!(h.raw_bytes(), &[b'd', b'b', b'i', b'n', 0x01, 0x00, 0x00]);
    }
}
