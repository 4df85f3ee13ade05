//! telemetry/counters.rs
//! Mutable counters used during a run.
//!
//! Converted into an immutable `TelemetrySnapshot` at pipeline end.
use serde::{Deserialize, Serialize};

use crate::constants::FRAME_LEN_PREFIX;

/// Deterministic counters collected during stream processing
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub chunks: u64,
    pub frames: u64,
    /// Bytes read from the input (raw on compress, framed on decompress).
    pub bytes_input: u64,
    /// Sum of frame payload lengths.
    pub bytes_compressed: u64,
    /// Bytes written to the output.
    pub bytes_output: u64,
    /// Length prefixes.
    pub bytes_overhead: u64,
}

impl TelemetryCounters {
    /// Record one compressed chunk written as a frame.
    pub fn add_compressed_chunk(&mut self, payload_len: usize) {
        self.chunks += 1;
        self.frames += 1;
        self.bytes_compressed += payload_len as u64;
        self.bytes_overhead += FRAME_LEN_PREFIX as u64;
        self.bytes_output += (FRAME_LEN_PREFIX + payload_len) as u64;
    }

    /// Record one frame read and decompressed.
    pub fn add_decompressed_frame(&mut self, payload_len: usize, raw_len: usize) {
        self.chunks += 1;
        self.frames += 1;
        self.bytes_input += (FRAME_LEN_PREFIX + payload_len) as u64;
        self.bytes_compressed += payload_len as u64;
        self.bytes_overhead += FRAME_LEN_PREFIX as u64;
        self.bytes_output += raw_len as u64;
    }

    /// Record raw input consumed by the chunker.
    pub fn add_input(&mut self, len: usize) {
        self.bytes_input += len as u64;
    }
}
