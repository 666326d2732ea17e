use std::io::Write;

use log::{debug, trace, warn};

use crate::config::CodecConfig;
use crate::framing::{self, FramePart};
use crate::headers::{validate_extended, Header, HeaderKind};
use crate::stream::StreamState;
use crate::telemetry::{StreamCounters, TelemetrySnapshot};
use crate::types::StreamError;

/// Writes a header, then length-prefixed messages, to one byte sink.
#[derive(Debug)]
pub struct StreamWriter<W: Write> {
    inner: Option<W>,
    state: StreamState,
    config: CodecConfig,
    counters: StreamCounters,
}

impl<W: Write> StreamWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_config(inner, CodecConfig::default())
    }

    pub fn with_config(inner: W, config: CodecConfig) -> Self {
        Self {
            inner: Some(inner),
            state: StreamState::Fresh,
            config,
            counters: StreamCounters::default(),
        }
    }

    /// Write a prepared header in a single sink write.
    ///
    /// A version 1 header with an empty content type is rejected unless
    /// `allow_empty_content_type` is set. The latch only flips on success;
    /// a failed write leaves the writer `Fresh`.
    pub fn write_header(&mut self, header: &Header) -> Result<(), StreamError> {
        if self.state.header_consumed() {
            return Err(StreamError::HeaderAlreadyConsumed);
        }
        // Decoded headers may carry an empty v1 content type.
        if let HeaderKind::Extended(h) = header.kind() {
            validate_extended(h.content_type(), self.config.allow_empty_content_type)?;
        }
        let inner = self.inner.as_mut().ok_or(StreamError::Closed)?;

        framing::write_part(inner, header.raw_bytes(), FramePart::Header).map_err(|e| {
            warn!("dbin header write failed: {e}");
            e
        })?;

        self.state = StreamState::HeaderConsumed;
        self.counters.add_header(header.encoded_len());
        debug!("dbin header written: {}", header.summary());
        Ok(())
    }

    /// Format version 0 header (`content_type` exactly 3 bytes, version `0..=99`).
    pub fn write_legacy_header(&mut self, content_type: impl AsRef<[u8]>, content_version: i32) -> Result<(), StreamError> {
        if self.state.header_consumed() {
            return Err(StreamError::HeaderAlreadyConsumed);
        }
        let header = Header::legacy(content_type, content_version)?;
        self.write_header(&header)
    }

    /// Format version 1 header, honoring `allow_empty_content_type`.
    pub fn write_extended_header(&mut self, content_type: impl AsRef<[u8]>) -> Result<(), StreamError> {
        if self.state.header_consumed() {
            return Err(StreamError::HeaderAlreadyConsumed);
        }
        let header = Header::extended_with(content_type, &self.config)?;
        self.write_header(&header)
    }

    pub fn write_message(&mut self, msg: impl AsRef<[u8]>) -> Result<(), StreamError> {
        if !self.state.header_consumed() {
            return Err(StreamError::HeaderNotConsumed);
        }
        let inner = self.inner.as_mut().ok_or(StreamError::Closed)?;
        let msg = msg.as_ref();

        framing::write_message(inner, msg, &self.config).map_err(|e| {
            warn!("dbin message #{} write failed: {e}", self.counters.messages + 1);
            e
        })?;

        self.counters.add_message(msg.len());
        trace!("dbin message #{} written: {} bytes", self.counters.messages, msg.len());
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), StreamError> {
        let inner = self.inner.as_mut().ok_or(StreamError::Closed)?;
        inner.flush().map_err(StreamError::Sink)
    }

    pub fn counters(&self) -> &StreamCounters {
        &self.counters
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from_counters(&self.counters)
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    /// Flush and drop the sink. Safe to call repeatedly; only the first
    /// call can fail.
    pub fn close(&mut self) -> Result<(), StreamError> {
        match self.inner.take() {
            Some(mut inner) => {
                inner.flush().map_err(StreamError::Sink)?;
                debug!("dbin writer closed after {} messages", self.counters.messages);
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Hand the sink back (unflushed), unless already closed.
    pub fn into_inner(mut self) -> Option<W> {
        self.inner.take()
    }
}
