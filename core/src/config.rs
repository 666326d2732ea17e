use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_READ_CHUNK_SIZE;

/// Codec knobs shared by `StreamReader` and `StreamWriter`.
///
/// Deserializable with defaults so a host application can embed it in its
/// own config file, e.g. `{"max_message_len": 16777216}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Accept an empty content type when *writing* format version 1.
    /// Decoding always accepts it; older producers emitted it.
    pub allow_empty_content_type: bool,

    /// Upper bound on a single message, enforced on read and write.
    /// `None` admits the full `u32` range.
    pub max_message_len: Option<u32>,

    /// Largest step by which a message buffer grows while reading.
    pub read_chunk_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            allow_empty_content_type: false,
            max_message_len: None,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
        }
    }
}

impl CodecConfig {
    pub fn new(allow_empty_content_type: Option<bool>, max_message_len: Option<u32>) -> Self {
        Self {
            allow_empty_content_type: allow_empty_content_type.unwrap_or(false),
            max_message_len,
            ..Self::default()
        }
    }

    /// Compatibility mode for producers that wrote empty content types.
    pub fn compat() -> Self {
        Self { allow_empty_content_type: true, ..Self::default() }
    }

    pub fn with_max_message_len(mut self, max: u32) -> Self {
        self.max_message_len = Some(max);
        self
    }

    pub fn with_read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = size.max(1);
        self
    }

    /// Effective per-message ceiling.
    #[inline]
    pub fn message_limit(&self) -> u32 {
        self.max_message_len.unwrap_or(u32::MAX)
    }
}
