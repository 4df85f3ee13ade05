//! Thread-safe collection of tagged compress results.
//!
//! Append-only while the pool runs; consumed once by `finalize()` after the
//! pool barrier, which restores chunk order and checks exactly-once delivery.

use std::sync::{Mutex, PoisonError};

use crate::stream::types::{ChunkOutcome, CompressedChunk, TaskFailure};
use crate::types::StreamError;

#[derive(Debug, Default)]
pub struct Aggregator {
    items: Mutex<Vec<ChunkOutcome>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: Mutex::new(Vec::with_capacity(capacity)) }
    }

    /// Locked push; safe under concurrent callers.
    pub fn append(&self, item: ChunkOutcome) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(item);
    }

    /// Sort by id and validate the collection against `expected` chunks.
    ///
    /// Taking `self` by value means every task holding a reference must be gone,
    /// i.e. the pool has been shut down.
    ///
    /// # Errors
    /// - `StreamError::Codec` for the lowest-id chunk whose codec call failed.
    /// - `StreamError::Pipeline` for a panicked task, a missing id or a duplicate id.
    pub fn finalize(self, expected: usize) -> Result<Vec<CompressedChunk>, StreamError> {
        let mut items = self.items.into_inner().unwrap_or_else(PoisonError::into_inner);

        // Stable sort: a duplicate id keeps its arrival order and is reported below.
        items.sort_by_key(ChunkOutcome::id);

        let mut chunks = Vec::with_capacity(items.len());
        for (slot, item) in items.into_iter().enumerate() {
            let slot = slot as u64;
            if item.id() < slot {
                return Err(StreamError::Pipeline(format!("chunk {} produced more than one result", item.id())));
            }
            if item.id() > slot {
                return Err(StreamError::Pipeline(format!("no result for chunk {slot}")));
            }
            match item {
                ChunkOutcome::Compressed(c) => chunks.push(c),
                ChunkOutcome::Failed { id, reason: TaskFailure::Codec(source) } => {
                    return Err(StreamError::Codec { chunk_id: id, source });
                }
                ChunkOutcome::Failed { id, reason: TaskFailure::Panicked(msg) } => {
                    return Err(StreamError::Pipeline(format!("compress task for chunk {id} panicked: {msg}")));
                }
            }
        }

        if chunks.len() < expected {
            return Err(StreamError::Pipeline(format!("no result for chunk {}", chunks.len())));
        }
        if chunks.len() > expected {
            return Err(StreamError::Pipeline(format!(
                "unexpected chunk {} beyond expected count {expected}",
                chunks.len() - 1
            )));
        }

        Ok(chunks)
    }
}
