//! Pipeline wiring: chunk → parallel compress → reorder → frame, and the
//! sequential frame → decompress consumer.

use std::io::{Read, Write};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::compression::{Codec, CodecKind};
use crate::constants::{DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
use crate::stream::chunking::read_chunks;
use crate::stream::dispatcher::compress_parallel;
use crate::stream::framing::{FrameReader, FrameWriter};
use crate::stream::parallelism::ParallelismProfile;
use crate::telemetry::{Direction, Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::StreamError;

/// Run configuration shared by both directions.
///
/// The decompressor reads `chunk_size` as the maximum decoded size of one
/// chunk; it must be at least the compressor's chunk size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub chunk_size: usize,
    /// `None`: one worker per hardware thread.
    pub workers: Option<usize>,
    pub codec: CodecKind,
    /// `None`: the codec's default level.
    pub level: Option<i32>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            workers: None,
            codec: CodecKind::default(),
            level: None,
        }
    }
}

impl PipelineConfig {
    pub fn new(chunk_size: usize, workers: Option<usize>, codec: CodecKind, level: Option<i32>) -> Self {
        Self { chunk_size, workers, codec, level }
    }

    pub fn validate(&self) -> Result<(), StreamError> {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(StreamError::Validation(format!(
                "chunk size {} out of range 1..={}",
                self.chunk_size, MAX_CHUNK_SIZE
            )));
        }
        if self.workers == Some(0) {
            return Err(StreamError::Validation("workers must be at least 1".into()));
        }
        if let Some(level) = self.level {
            self.codec.check_level(level)?;
        }
        Ok(())
    }

    pub fn profile(&self) -> ParallelismProfile {
        ParallelismProfile::resolve(self.workers)
    }
}

// ============================================================
// Compress pipeline
// ============================================================
pub fn run_compress_pipeline<R, W>(
    reader: &mut R,
    writer: W,
    codec: Arc<dyn Codec>,
    config: &PipelineConfig,
) -> Result<TelemetrySnapshot, StreamError>
where
    R: Read + ?Sized,
    W: Write,
{
    config.validate()?;
    let mut counters = TelemetryCounters::default();
    let mut timer = TelemetryTimer::new();
    let mut frames = FrameWriter::new(writer);
    info!("[PIPELINE] compress: codec={}, chunk_size={}", codec.name(), config.chunk_size);

    // ---- Phase 1: buffer input into chunks ----
    let chunks = timer.time(Stage::Read, || read_chunks(reader, config.chunk_size))?;
    counters.add_input(chunks.iter().map(|c| c.payload.len()).sum());

    if chunks.is_empty() {
        info!("[PIPELINE] input is empty, nothing to compress");
        frames.flush().map_err(|e| StreamError::from_frame(0, e))?;
        timer.finish();
        return Ok(TelemetrySnapshot::from(Direction::Compress, codec.name(), 0, &counters, &timer));
    }

    // ---- Phase 2: scatter/gather across the pool ----
    let workers = config.profile().workers_for(chunks.len());
    info!("[PIPELINE] read {} chunks, compressing on {} workers", chunks.len(), workers);

    let start = Instant::now();
    let output = compress_parallel(chunks, codec.clone(), workers);
    let parallel_time = start.elapsed();
    let output = output?;
    timer.add_stage_time(Stage::Compress, parallel_time.saturating_sub(output.reorder_time));
    timer.add_stage_time(Stage::Reorder, output.reorder_time);

    // ---- Phase 3: frames in ascending id order ----
    let start = Instant::now();
    for chunk in &output.chunks {
        frames
            .write_frame(&chunk.payload)
            .map_err(|e| StreamError::from_frame(chunk.id, e))?;
        counters.add_compressed_chunk(chunk.payload.len());
    }
    frames
        .flush()
        .map_err(|e| StreamError::from_frame(frames.frames_written(), e))?;
    timer.add_stage_time(Stage::Write, start.elapsed());

    debug!("[WRITER] wrote {} frames, {} bytes", frames.frames_written(), frames.bytes_written());
    timer.finish();
    Ok(TelemetrySnapshot::from(Direction::Compress, codec.name(), workers, &counters, &timer))
}

// ============================================================
// Decompress consumer (sequential)
// ============================================================
pub fn run_decompress_pipeline<R, W>(
    reader: R,
    mut writer: W,
    codec: Arc<dyn Codec>,
    max_chunk_size: usize,
) -> Result<TelemetrySnapshot, StreamError>
where
    R: Read,
    W: Write,
{
    if max_chunk_size == 0 || max_chunk_size > MAX_CHUNK_SIZE {
        return Err(StreamError::Validation(format!(
            "max chunk size {max_chunk_size} out of range 1..={MAX_CHUNK_SIZE}"
        )));
    }
    let mut counters = TelemetryCounters::default();
    let mut timer = TelemetryTimer::new();
    let mut frames = FrameReader::new(reader);
    info!("[PIPELINE] decompress: codec={}, max_chunk_size={}", codec.name(), max_chunk_size);

    loop {
        let frame_index = frames.index();
        let next = timer.time(Stage::Read, || frames.next());
        let frame = match next {
            None => break,
            Some(res) => res.map_err(|e| StreamError::from_frame(frame_index, e))?,
        };

        let raw = timer
            .time(Stage::Decompress, || codec.decompress(&frame.payload, max_chunk_size))
            .map_err(|source| StreamError::Codec { chunk_id: frame_index, source })?;

        timer.time(Stage::Write, || writer.write_all(&raw))?;
        counters.add_decompressed_frame(frame.len(), raw.len());
        debug!("[READER] frame {frame_index}: {} -> {} bytes", frame.len(), raw.len());
    }

    writer.flush()?;
    info!("[PIPELINE] decompressed {} frames", counters.frames);
    timer.finish();
    Ok(TelemetrySnapshot::from(Direction::Decompress, codec.name(), 1, &counters, &timer))
}
