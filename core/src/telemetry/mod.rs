//! telemetry/mod.rs
//! Stream counters and immutable snapshots.
//!
//! Counters live on each reader/writer instance; nothing is global.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
