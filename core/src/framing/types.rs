use thiserror::Error;

/// Which part of a frame a write was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePart {
    Header,
    Length,
    Body,
}

impl FramePart {
    pub const fn as_str(self) -> &'static str {
        match self {
            FramePart::Header => "header",
            FramePart::Length => "length",
            FramePart::Body => "message",
        }
    }
}

impl std::fmt::Display for FramePart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Source ended inside the 4-byte length prefix (1..=3 bytes present).
    #[error("incomplete message length: required 4 bytes, got {actual}")]
    TruncatedLength { actual: usize },

    /// Source ended inside a message body.
    #[error("incomplete message: required {expected} bytes, got {actual}")]
    TruncatedMessage { expected: u32, actual: usize },

    /// Sink stopped accepting bytes before the write was complete.
    #[error("incomplete {part} write ({expected} bytes): wrote only {written} bytes")]
    ShortWrite {
        part: FramePart,
        expected: usize,
        written: usize,
    },

    /// Message length over the configured (or u32) ceiling.
    #[error("message too large: {len} bytes, maximum {max}")]
    MessageTooLarge { len: u64, max: u32 },
}

impl FrameError {
    pub fn is_truncation(&self) -> bool {
        matches!(self, FrameError::TruncatedLength { .. } | FrameError::TruncatedMessage { .. })
    }
}
