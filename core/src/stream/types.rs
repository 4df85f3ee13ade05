use std::fmt;
use bytes::Bytes;

use crate::compression::CodecError;

/// Contiguous slice of the original input; the unit of parallel work.
///
/// Ids are dense over `[0, count)` in read order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub id: u64,
    pub payload: Bytes,
}

/// Output of one compress task, tagged with the id of its source chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedChunk {
    pub id: u64,
    /// Uncompressed length of the source chunk (telemetry only, never written).
    pub raw_len: usize,
    pub payload: Bytes,
}

/// Why a compress task produced no payload.
#[derive(Debug)]
pub enum TaskFailure {
    Codec(CodecError),
    Panicked(String),
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskFailure::Codec(e) => write!(f, "{}", e),
            TaskFailure::Panicked(msg) => write!(f, "task panicked: {}", msg),
        }
    }
}

/// Tagged result of one compress task.
#[derive(Debug)]
pub enum ChunkOutcome {
    Compressed(CompressedChunk),
    Failed { id: u64, reason: TaskFailure },
}

impl ChunkOutcome {
    pub fn id(&self) -> u64 {
        match self {
            ChunkOutcome::Compressed(c) => c.id,
            ChunkOutcome::Failed { id, .. } => *id,
        }
    }
}
