//! Compression dispatcher: scatter one compress task per chunk, gather after the barrier.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use tracing::{debug, warn};

use crate::compression::Codec;
use crate::stream::aggregator::Aggregator;
use crate::stream::types::{Chunk, ChunkOutcome, CompressedChunk, TaskFailure};
use crate::stream::worker_pool::{panic_message, PoolStats, WorkerPool};
use crate::types::StreamError;

/// Compress one chunk into a tagged outcome. Never panics.
pub fn compress_chunk(codec: &dyn Codec, chunk: Chunk) -> ChunkOutcome {
    let id = chunk.id;
    let raw_len = chunk.payload.len();

    match panic::catch_unwind(AssertUnwindSafe(|| codec.compress(&chunk.payload))) {
        Ok(Ok(payload)) => ChunkOutcome::Compressed(CompressedChunk {
            id,
            raw_len,
            payload: Bytes::from(payload),
        }),
        Ok(Err(e)) => {
            warn!("[DISPATCH] chunk {id}: {} failed: {e}", codec.name());
            ChunkOutcome::Failed { id, reason: TaskFailure::Codec(e) }
        }
        Err(payload) => {
            let msg = panic_message(payload.as_ref());
            warn!("[DISPATCH] chunk {id}: {} panicked: {msg}", codec.name());
            ChunkOutcome::Failed { id, reason: TaskFailure::Panicked(msg) }
        }
    }
}

/// Enqueue one compress task per chunk, in id order.
///
/// Each task owns its chunk; the result is appended to `aggregator` after the
/// codec call returns, so the aggregator lock never covers compression.
pub fn dispatch(
    pool: &WorkerPool,
    chunks: Vec<Chunk>,
    codec: &Arc<dyn Codec>,
    aggregator: &Arc<Aggregator>,
) -> Result<usize, StreamError> {
    let mut dispatched = 0;
    for chunk in chunks {
        let id = chunk.id;
        let codec = codec.clone();
        let aggregator = aggregator.clone();

        let accepted = pool.enqueue(move || {
            let outcome = compress_chunk(codec.as_ref(), chunk);
            aggregator.append(outcome);
        });
        if !accepted {
            return Err(StreamError::Pipeline(format!("worker pool closed before chunk {id} was dispatched")));
        }
        dispatched += 1;
    }
    debug!("[DISPATCH] {dispatched} tasks enqueued on {} workers", pool.size());
    Ok(dispatched)
}

/// Result of one scatter/gather round.
#[derive(Debug)]
pub struct ParallelOutput {
    /// Compressed chunks in ascending id order.
    pub chunks: Vec<CompressedChunk>,
    pub pool_stats: PoolStats,
    /// Time spent in `Aggregator::finalize`.
    pub reorder_time: Duration,
}

/// Compress `chunks` on a pool of `workers` threads and return them in id order.
///
/// The pool's `shutdown()` is the only synchronization barrier: no result is
/// read before it returns.
pub fn compress_parallel(
    chunks: Vec<Chunk>,
    codec: Arc<dyn Codec>,
    workers: usize,
) -> Result<ParallelOutput, StreamError> {
    let expected = chunks.len();
    let pool = WorkerPool::new(workers)?;
    let aggregator = Arc::new(Aggregator::with_capacity(expected));

    let dispatched = dispatch(&pool, chunks, &codec, &aggregator);
    pool.shutdown();
    dispatched?;

    let pool_stats = pool.stats();
    debug!(
        "[DISPATCH] pool drained: executed={}, panicked={}",
        pool_stats.executed, pool_stats.panicked
    );

    let aggregator = Arc::try_unwrap(aggregator)
        .map_err(|_| StreamError::Pipeline("aggregator still shared after pool shutdown".into()))?;
    let start = Instant::now();
    let chunks = aggregator.finalize(expected)?;
    let reorder_time = start.elapsed();

    Ok(ParallelOutput { chunks, pool_stats, reorder_time })
}
