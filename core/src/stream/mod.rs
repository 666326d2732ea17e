//! stream — header-then-messages orchestration over one byte source/sink.
//!
//! Lifecycle per instance: `Fresh → HeaderConsumed`, one transition, never
//! reset. Message calls require `HeaderConsumed`; a second header call fails
//! with `HeaderAlreadyConsumed`. `close()` drops the source/sink and is
//! idempotent.

pub mod reader;
pub mod writer;

pub use reader::{Messages, StreamReader};
pub use writer::StreamWriter;

/// Single-use header latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamState {
    #[default]
    Fresh,
    HeaderConsumed,
}

impl StreamState {
    #[inline]
    pub fn header_consumed(self) -> bool {
        self == StreamState::HeaderConsumed
    }
}
