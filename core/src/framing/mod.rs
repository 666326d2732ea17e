//! Message framing for the stream body.
//!
//! Responsibilities:
//! - Length-prefix (u32 big-endian) each message on write
//! - Read one message at a time, telling clean end of stream apart from
//!   truncation inside the prefix or the body
//!
//! Non-responsibilities:
//! - Header parsing
//! - Payload interpretation (messages are opaque)
//! - Owning the byte source/sink

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{FrameError, FramePart};
pub use encode::{encode_length_prefix, write_message, write_part};
pub use decode::{read_length_prefix, read_message};
