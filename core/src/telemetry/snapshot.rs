//! telemetry/snapshot.rs
//!
//! Immutable view of a stream's counters with derived ratios.

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::StreamCounters;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub headers: u64,
    pub messages: u64,
    pub messages_empty: u64,
    pub bytes_payload: u64,
    pub bytes_overhead: u64,
    pub bytes_total: u64,
    /// `bytes_overhead / bytes_total`, 0.0 for an empty stream.
    pub overhead_ratio: f64,
    /// Mean payload bytes per message, 0.0 with no messages.
    pub mean_message_len: f64,
}

impl TelemetrySnapshot {
    pub fn from_counters(counters: &StreamCounters) -> Self {
        let bytes_total = counters.bytes_total();

        let overhead_ratio = if bytes_total > 0 {
            counters.bytes_overhead as f64 / bytes_total as f64
        } else {
            0.0
        };

        let mean_message_len = if counters.messages > 0 {
            counters.bytes_payload as f64 / counters.messages as f64
        } else {
            0.0
        };

        Self {
            headers: counters.headers,
            messages: counters.messages,
            messages_empty: counters.messages_empty,
            bytes_payload: counters.bytes_payload,
            bytes_overhead: counters.bytes_overhead,
            bytes_total,
            overhead_ratio,
            mean_message_len,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&StreamCounters> for TelemetrySnapshot {
    fn from(counters: &StreamCounters) -> Self {
        TelemetrySnapshot::from_counters(counters)
    }
}
