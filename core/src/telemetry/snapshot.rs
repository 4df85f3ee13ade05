//! telemetry/snapshot.rs
//! Immutable summary of one run.

use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Compress,
    Decompress,
}

/// Captures counters, ratio, throughput, stage timings and elapsed duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub direction: Direction,
    pub codec: String,
    pub workers: usize,
    pub chunks: u64,
    pub frames: u64,
    pub bytes_input: u64,
    pub bytes_compressed: u64,
    pub bytes_output: u64,
    pub bytes_overhead: u64,
    /// Compressed payload bytes per raw byte; 0 for empty input.
    pub compression_ratio: f64,
    pub throughput_raw_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
    /// Captured output, when the API was asked to keep it in memory.
    #[serde(skip)]
    pub output: Option<Vec<u8>>,
}

impl TelemetrySnapshot {
    pub fn from(
        direction: Direction,
        codec: &str,
        workers: usize,
        counters: &TelemetryCounters,
        timer: &TelemetryTimer,
    ) -> Self {
        let elapsed = timer.elapsed();
        let raw = match direction {
            Direction::Compress => counters.bytes_input,
            Direction::Decompress => counters.bytes_output,
        };

        let compression_ratio = if raw > 0 {
            counters.bytes_compressed as f64 / raw as f64
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            raw as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            direction,
            codec: codec.to_string(),
            workers,
            chunks: counters.chunks,
            frames: counters.frames,
            bytes_input: counters.bytes_input,
            bytes_compressed: counters.bytes_compressed,
            bytes_output: counters.bytes_output,
            bytes_overhead: counters.bytes_overhead,
            compression_ratio,
            throughput_raw_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
            output: None,
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        self.stage_times.has_all(expected)
    }

    /// Internal invariants:
    /// - one frame per chunk
    /// - framing overhead is exactly one prefix per frame
    /// - stage times fit inside the elapsed wall time
    pub fn sanity_check(&self) -> bool {
        self.frames == self.chunks
            && self.bytes_overhead == self.frames * crate::constants::FRAME_LEN_PREFIX as u64
            && self.total_stage_time() <= self.elapsed
    }

    pub fn attach_output(&mut self, output: Vec<u8>) {
        self.output = Some(output);
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
