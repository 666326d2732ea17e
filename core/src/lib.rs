//! dbin-core
//!
//! Codec for the `dbin` framed stream container: a magic-prefixed header
//! naming the payload kind, then length-prefixed opaque messages.
//! Synchronous, single-pass, over any `Read`/`Write`.

#![forbid(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;
pub mod types;
pub mod utils;

// Codec layers
pub mod headers;
pub mod framing;
pub mod stream;

// Collaborator adapters and observability
pub mod io;
pub mod telemetry;

pub use config::CodecConfig;
pub use headers::{FormatVersion, Header, HeaderError, HeaderKind};
pub use framing::FrameError;
pub use stream::{StreamReader, StreamWriter};
pub use types::StreamError;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::CodecConfig;
    pub use crate::framing::FrameError;
    pub use crate::headers::{FormatVersion, Header, HeaderError, HeaderField, HeaderKind};
    pub use crate::stream::{StreamReader, StreamWriter};
    pub use crate::types::StreamError;
}
