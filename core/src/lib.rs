//! chunkpress-core
//!
//! Parallel chunked compression engine.
//! Splits input into fixed-size chunks, compresses them on a worker pool and
//! writes a length-prefixed frame stream that decodes chunk by chunk.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;

pub mod compression;
pub mod telemetry;

// Stream layers
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{create_codec, Codec, CodecError, CodecKind};
    pub use crate::constants::{DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
    pub use crate::stream::{
        compress_bytes, compress_stream, decompress_bytes, decompress_stream, ApiConfig,
        InputSource, OutputSink, PipelineConfig,
    };
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::StreamError;
}
