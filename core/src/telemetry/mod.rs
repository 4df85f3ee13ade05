//! telemetry/mod.rs
//! Counters, stage timers and immutable snapshots for compress/decompress runs.
//!
//! Notes:
//! - Counters are only touched by the coordinating thread; workers report
//!   through the aggregator, never through shared telemetry state.
//! - Snapshots serialize to JSON for the CLI `--stats` flag.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
