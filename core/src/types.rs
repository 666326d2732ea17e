use std::io;

use thiserror::Error;

use crate::{framing::FrameError, headers::HeaderError};

/// Unified stream error covering header, framing, lifecycle and I/O failures.
/// - Header/frame errors keep their own enums so callers can match precisely.
/// - Source and sink I/O errors are kept apart; they need different handling.
/// - Clean end of stream is not an error: `read_message` returns `Ok(None)`.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("header error: {0}")]
    Header(#[from] HeaderError),

    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Header read/write attempted a second time on the same instance.
    #[error("header was already consumed on this stream")]
    HeaderAlreadyConsumed,

    /// Message read/write attempted before the header.
    #[error("header must be consumed before any message")]
    HeaderNotConsumed,

    /// Operation after `close()`.
    #[error("stream is closed")]
    Closed,

    /// Error reported by the byte source.
    #[error("byte source error: {0}")]
    Source(#[source] io::Error),

    /// Error reported by the byte sink.
    #[error("byte sink error: {0}")]
    Sink(#[source] io::Error),
}

impl StreamError {
    /// True when the stream ended mid-record (header field, length or body).
    pub fn is_truncation(&self) -> bool {
        match self {
            StreamError::Header(e) => e.is_truncation(),
            StreamError::Frame(e) => e.is_truncation(),
            _ => false,
        }
    }
}

pub type Result<T, E = StreamError> = std::result::Result<T, E>;
