use std::io;
use thiserror::Error;

use crate::{compression::CodecError, stream::framing::FrameError};

/// Unified run-level error covering usage, I/O, codec, framing and pipeline failures.
/// - `From<T>` impls enable `?` across the pipeline.
/// - Codec and format errors carry the chunk/frame index they were raised for.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Bad or missing arguments; raised before any work starts.
    #[error("usage error: {0}")]
    Usage(String),

    /// File open/read/write failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Codec could not be constructed from the configuration.
    #[error("codec configuration error: {0}")]
    CodecConfig(#[from] CodecError),

    /// Compression or decompression of one chunk failed.
    #[error("codec error in chunk {chunk_id}: {source}")]
    Codec {
        chunk_id: u64,
        #[source]
        source: CodecError,
    },

    /// Truncated or malformed frame in a compressed stream.
    #[error("format error in frame {frame_index}: {source}")]
    Format {
        frame_index: u64,
        #[source]
        source: FrameError,
    },

    /// Worker pool or aggregation invariant broken.
    #[error("pipeline error: {0}")]
    Pipeline(String),

    /// Generic high-level validation with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}

impl StreamError {
    /// Classify a framing failure at `frame_index`.
    ///
    /// Underlying I/O failures stay `Io`; only malformed or truncated frames are `Format`.
    pub fn from_frame(frame_index: u64, err: FrameError) -> Self {
        match err {
            FrameError::Io(e) => StreamError::Io(e),
            source => StreamError::Format { frame_index, source },
        }
    }

    /// Chunk id named by a per-chunk codec failure, if any.
    pub fn chunk_id(&self) -> Option<u64> {
        match self {
            StreamError::Codec { chunk_id, .. } => Some(*chunk_id),
            _ => None,
        }
    }

    /// Stream position of a malformed frame, if any.
    pub fn frame_index(&self) -> Option<u64> {
        match self {
            StreamError::Format { frame_index, .. } => Some(*frame_index),
            _ => None,
        }
    }
}
