//! telemetry/counters.rs
//! Per-stream counters.
//!
//! Summary: Tallies headers, messages and bytes as a reader or writer runs.
//! Converted into an immutable `TelemetrySnapshot` on demand.
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::constants::MESSAGE_LEN_PREFIX;

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamCounters {
    pub headers: u64,
    pub messages: u64,
    pub messages_empty: u64,
    /// Message body bytes.
    pub bytes_payload: u64,
    /// Header bytes plus every 4-byte length prefix.
    pub bytes_overhead: u64,
}

impl StreamCounters {
    /// Record the stream header as overhead.
    pub fn add_header(&mut self, header_len: usize) {
        self.headers += 1;
        self.bytes_overhead += header_len as u64;
    }

    /// Record one complete message of `payload_len` bytes and its prefix.
    pub fn add_message(&mut self, payload_len: usize) {
        self.messages += 1;
        if payload_len == 0 {
            self.messages_empty += 1;
        }
        self.bytes_payload += payload_len as u64;
        self.bytes_overhead += MESSAGE_LEN_PREFIX as u64;
    }

    /// Total bytes on the wire for everything counted so far.
    pub fn bytes_total(&self) -> u64 {
        self.bytes_payload + self.bytes_overhead
    }

    pub fn merge(&mut self, other: &StreamCounters) {
        self.headers += other.headers;
        self.messages += other.messages;
        self.messages_empty += other.messages_empty;
        self.bytes_payload += other.bytes_payload;
        self.bytes_overhead += other.bytes_overhead;
    }
}

impl AddAssign for StreamCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
