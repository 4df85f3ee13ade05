//! stream: parallel chunk compression and sequential decompression.
//!
//! Layering, leaves first:
//! chunking → worker_pool → dispatcher/aggregator → framing → pipeline → core.

pub mod types;
pub mod chunking;
pub mod worker_pool;
pub mod aggregator;
pub mod dispatcher;
pub mod framing;
pub mod parallelism;
pub mod io;
pub mod pipeline;
pub mod core;

pub use types::{Chunk, ChunkOutcome, CompressedChunk, TaskFailure};
pub use worker_pool::{PoolStats, WorkerPool};
pub use aggregator::Aggregator;
pub use pipeline::PipelineConfig;

pub use io::{
    InputSource,
    OutputSink,
};

pub use self::core::{
    compress_bytes,
    compress_stream,
    decompress_bytes,
    decompress_stream,
    ApiConfig,
};
