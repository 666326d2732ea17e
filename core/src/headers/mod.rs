//! headers/mod.rs
//! Stream header codec.
//!
//! Notes:
//! - Two encodings behind one magic: version 0 (fixed 10 bytes, 3-byte
//!   content type + 2-digit content version) and version 1 (u16-prefixed
//!   content type of any length up to 65535).
//! - All multi-byte integers are big-endian.
//! - `Header` normalizes both; `HeaderKind` keeps the variant explicit.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
