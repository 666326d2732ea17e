/// Magic marker at offset 0 of every stream.
pub const MAGIC_DBIN: [u8; 4] = *b"dbin";

/// Legacy fixed-width header: 3-byte content type + 2 ASCII version digits.
pub const FORMAT_V0: u8 = 0x00;
/// Extended header: u16 length-prefixed content type, no content version.
pub const FORMAT_V1: u8 = 0x01;

/// Bytes before any version-specific field (magic + version byte).
pub const HEADER_PREFIX_LEN: usize = 5;

/// Legacy layout widths.
pub mod legacy {
    pub const CONTENT_TYPE_LEN: usize = 3;
    pub const CONTENT_VERSION_LEN: usize = 2;
    pub const MAX_CONTENT_VERSION: i32 = 99;
    /// Whole header, always 10 bytes.
    pub const HEADER_LEN: usize =
        super::HEADER_PREFIX_LEN + CONTENT_TYPE_LEN + CONTENT_VERSION_LEN;
}

/// Extended layout widths.
pub mod extended {
    pub const CONTENT_TYPE_LEN_FIELD: usize = 2;
    pub const MAX_CONTENT_TYPE_LEN: usize = u16::MAX as usize;
    /// Header bytes excluding the content type itself.
    pub const FIXED_LEN: usize = super::HEADER_PREFIX_LEN + CONTENT_TYPE_LEN_FIELD;
}

/// Big-endian u32 length in front of every message.
pub const MESSAGE_LEN_PREFIX: usize = 4;

/// Growth step for message body buffers when reading.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 64 * 1024; // 64 KiB
