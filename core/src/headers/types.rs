//! headers/types.rs
//! Stream header: one normalized surface over two wire encodings.
//!
//! Wire notes:
//! - Every header starts with `"dbin"` and a single format-version byte.
//! - Version 0 is fixed at 10 bytes: 3-byte content type + 2 ASCII digits.
//! - Version 1 is `7 + n` bytes: big-endian u16 `n` + `n` content-type bytes.
//! - `raw` always holds the exact bytes read or written for this header.

use std::fmt;

use bytes::Bytes;
use num_enum::TryFromPrimitive;
use thiserror::Error;

use crate::constants::{legacy, MAGIC_DBIN, FORMAT_V0, FORMAT_V1};
use crate::utils::fmt_bytes;

/// Header encoding selected by the byte after the magic.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum FormatVersion {
    Legacy   = FORMAT_V0,
    Extended = FORMAT_V1,
}

impl FormatVersion {
    pub fn verify(raw: u8) -> Result<Self, HeaderError> {
        Self::try_from_primitive(raw).map_err(|_| HeaderError::UnsupportedFormatVersion(raw))
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.as_u8())
    }
}

/// Header fields named in truncation diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HeaderField {
    Magic,
    FormatVersion,
    ContentType,
    ContentVersion,
    ContentTypeLength,
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HeaderField::Magic => "magic",
            HeaderField::FormatVersion => "format version",
            HeaderField::ContentType => "content type",
            HeaderField::ContentVersion => "content version",
            HeaderField::ContentTypeLength => "content type length",
        })
    }
}

/// Format version 0 body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyHeader {
    pub(crate) content_type: [u8; legacy::CONTENT_TYPE_LEN],
    /// Two ASCII digits, `"00"`..=`"99"`.
    pub(crate) content_version: [u8; legacy::CONTENT_VERSION_LEN],
}

impl LegacyHeader {
    pub fn content_type(&self) -> &[u8] {
        &self.content_type
    }

    pub fn content_version(&self) -> &str {
        // Digits are checked on both encode and decode.
        std::str::from_utf8(&self.content_version).unwrap_or("??")
    }

    pub fn content_version_number(&self) -> u8 {
        (self.content_version[0] - b'0') * 10 + (self.content_version[1] - b'0')
    }
}

/// Format version 1 body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedHeader {
    pub(crate) content_type: Bytes,
}

impl ExtendedHeader {
    pub fn content_type(&self) -> &[u8] {
        &self.content_type
    }
}

/// The two mutually exclusive header encodings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderKind {
    Legacy(LegacyHeader),
    Extended(ExtendedHeader),
}

impl HeaderKind {
    pub fn format_version(&self) -> FormatVersion {
        match self {
            HeaderKind::Legacy(_) => FormatVersion::Legacy,
            HeaderKind::Extended(_) => FormatVersion::Extended,
        }
    }
}

/// A parsed or ready-to-write stream header.
///
/// Immutable once built. Construct with [`Header::legacy`] /
/// [`Header::extended`] or obtain one from [`decode_header`](crate::headers::decode_header).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    kind: HeaderKind,
    raw: Bytes,
}

impl Header {
    pub(crate) fn from_parts(kind: HeaderKind, raw: Bytes) -> Self {
        Self { kind, raw }
    }

    pub fn kind(&self) -> &HeaderKind {
        &self.kind
    }

    pub fn format_version(&self) -> FormatVersion {
        self.kind.format_version()
    }

    /// Content type as raw bytes (the wire makes no UTF-8 promise).
    pub fn content_type(&self) -> &[u8] {
        match &self.kind {
            HeaderKind::Legacy(h) => h.content_type(),
            HeaderKind::Extended(h) => h.content_type(),
        }
    }

    /// Content type as UTF-8, if it is valid UTF-8.
    pub fn content_type_str(&self) -> Option<&str> {
        std::str::from_utf8(self.content_type()).ok()
    }

    /// Two-digit content version; only format version 0 carries one.
    pub fn content_version(&self) -> Option<&str> {
        match &self.kind {
            HeaderKind::Legacy(h) => Some(h.content_version()),
            HeaderKind::Extended(_) => None,
        }
    }

    pub fn content_version_number(&self) -> Option<u8> {
        match &self.kind {
            HeaderKind::Legacy(h) => Some(h.content_version_number()),
            HeaderKind::Extended(_) => None,
        }
    }

    /// Exact header bytes as consumed from or produced onto the wire.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn encoded_len(&self) -> usize {
        self.raw.len()
    }

    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        match self.content_version() {
            Some(v) => format!("{} {} content_version={}", self.format_version(), fmt_bytes(self.content_type()), v),
            None => format!("{} {}", self.format_version(), fmt_bytes(self.content_type())),
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// First four bytes are not `"dbin"`.
    #[error("magic string 'dbin' not found in header: expected {}, got {}", fmt_bytes(&MAGIC_DBIN), fmt_bytes(.have))]
    MagicMismatch { have: [u8; 4] },

    #[error("unsupported dbin format version: {0}")]
    UnsupportedFormatVersion(u8),

    /// Source ran dry inside a header field.
    #[error("truncated header field '{field}': expected {expected} bytes, got {actual}")]
    TruncatedHeaderField {
        field: HeaderField,
        expected: usize,
        actual: usize,
    },

    /// Content type byte length not allowed for the chosen version.
    #[error("invalid content type for format {format_version}: {len} bytes, expected {expected}")]
    InvalidContentType {
        format_version: FormatVersion,
        len: usize,
        expected: &'static str,
    },

    #[error("content version should be between 0 and 99, was {have}")]
    InvalidContentVersion { have: i32 },

    /// Legacy content version bytes on the wire are not two ASCII digits.
    #[error("content version is not two ASCII digits: {}", fmt_bytes(.have))]
    InvalidContentVersionDigits { have: [u8; 2] },
}

impl HeaderError {
    /// Whether the stream was cut short, as opposed to malformed.
    pub fn is_truncation(&self) -> bool {
        matches!(self, HeaderError::TruncatedHeaderField { .. })
    }
}
