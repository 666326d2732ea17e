use std::io::Read;

use bytes::Bytes;
use log::{debug, trace, warn};

use crate::config::CodecConfig;
use crate::framing;
use crate::headers::{decode_header, Header};
use crate::stream::StreamState;
use crate::telemetry::{StreamCounters, TelemetrySnapshot};
use crate::types::StreamError;

/// Reads a header, then length-prefixed messages, from one byte source.
///
/// ```no_run
/// # fn main() -> Result<(), dbin_core::types::StreamError> {
/// let file = std::fs::File::open("blocks.dbin").map_err(dbin_core::types::StreamError::Source)?;
/// let mut reader = dbin_core::StreamReader::new(file);
/// let header = reader.read_header()?;
/// println!("{header}");
/// while let Some(msg) = reader.read_message()? {
///     println!("{} bytes", msg.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct StreamReader<R: Read> {
    inner: Option<R>,
    state: StreamState,
    header: Option<Header>,
    config: CodecConfig,
    counters: StreamCounters,
}

impl<R: Read> StreamReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, CodecConfig::default())
    }

    pub fn with_config(inner: R, config: CodecConfig) -> Self {
        Self {
            inner: Some(inner),
            state: StreamState::Fresh,
            header: None,
            config,
            counters: StreamCounters::default(),
        }
    }

    /// Consume the header. Succeeds at most once per instance.
    pub fn read_header(&mut self) -> Result<Header, StreamError> {
        if self.state.header_consumed() {
            return Err(StreamError::HeaderAlreadyConsumed);
        }
        let inner = self.inner.as_mut().ok_or(StreamError::Closed)?;

        let header = decode_header(inner).map_err(|e| {
            warn!("dbin header rejected: {e}");
            e
        })?;

        self.state = StreamState::HeaderConsumed;
        self.counters.add_header(header.encoded_len());
        self.header = Some(header.clone());
        debug!("dbin header read: {}", header.summary());

        Ok(header)
    }

    /// Read the next message; `Ok(None)` at clean end of stream.
    pub fn read_message(&mut self) -> Result<Option<Bytes>, StreamError> {
        if !self.state.header_consumed() {
            return Err(StreamError::HeaderNotConsumed);
        }
        let inner = self.inner.as_mut().ok_or(StreamError::Closed)?;

        match framing::read_message(inner, &self.config) {
            Ok(Some(msg)) => {
                self.counters.add_message(msg.len());
                trace!("dbin message #{} read: {} bytes", self.counters.messages, msg.len());
                Ok(Some(msg))
            }
            Ok(None) => {
                debug!("dbin end of stream after {} messages", self.counters.messages);
                Ok(None)
            }
            Err(e) => {
                warn!("dbin message #{} failed: {e}", self.counters.messages + 1);
                Err(e)
            }
        }
    }

    /// Iterate remaining messages. Stops at end of stream or after the
    /// first error.
    pub fn messages(&mut self) -> Messages<'_, R> {
        Messages { reader: self, done: false }
    }

    /// The header, once read.
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn counters(&self) -> &StreamCounters {
        &self.counters
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from_counters(&self.counters)
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    /// Drop the byte source. Safe to call repeatedly.
    pub fn close(&mut self) -> Result<(), StreamError> {
        if self.inner.take().is_some() {
            debug!("dbin reader closed");
        }
        Ok(())
    }

    /// Hand the byte source back, unless already closed.
    pub fn into_inner(mut self) -> Option<R> {
        self.inner.take()
    }
}

/// Iterator returned by [`StreamReader::messages`].
pub struct Messages<'a, R: Read> {
    reader: &'a mut StreamReader<R>,
    done: bool,
}

impl<R: Read> Iterator for Messages<'_, R> {
    type Item = Result<Bytes, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_message() {
            Ok(Some(msg)) => Some(Ok(msg)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
