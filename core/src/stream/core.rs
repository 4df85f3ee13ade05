//! Stable public API.

use std::io::Cursor;

use crate::compression::create_codec;
use crate::stream::io::{open_input, open_output, take_buffer, InputSource, OutputSink};
use crate::stream::pipeline::{run_compress_pipeline, run_decompress_pipeline, PipelineConfig};
use crate::telemetry::TelemetrySnapshot;
use crate::types::StreamError;

#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// Capture `OutputSink::Memory` output into `TelemetrySnapshot::output`.
    /// Off by default; tests and benchmarks turn it on.
    pub with_buf: bool,
}

impl ApiConfig {
    pub fn with_buf_enabled() -> Self {
        Self { with_buf: true }
    }
}

/// Compress `input` into a framed stream.
pub fn compress_stream(
    input: InputSource,
    output: OutputSink,
    config: &PipelineConfig,
    api: ApiConfig,
) -> Result<TelemetrySnapshot, StreamError> {
    config.validate()?;
    let codec = create_codec(config.codec, config.level)?;

    let mut reader = open_input(input)?;
    let (writer, maybe_buf) = open_output(output, api.with_buf)?;

    let mut snapshot = run_compress_pipeline(&mut reader, writer, codec, config)?;

    if let Some(ref buf) = maybe_buf {
        snapshot.attach_output(take_buffer(buf));
    }
    Ok(snapshot)
}

/// Decompress a framed stream. `config.chunk_size` bounds each decoded chunk.
pub fn decompress_stream(
    input: InputSource,
    output: OutputSink,
    config: &PipelineConfig,
    api: ApiConfig,
) -> Result<TelemetrySnapshot, StreamError> {
    config.validate()?;
    let codec = create_codec(config.codec, config.level)?;

    let reader = open_input(input)?;
    let (writer, maybe_buf) = open_output(output, api.with_buf)?;

    let mut snapshot = run_decompress_pipeline(reader, writer, codec, config.chunk_size)?;

    if let Some(ref buf) = maybe_buf {
        snapshot.attach_output(take_buffer(buf));
    }
    Ok(snapshot)
}

/// In-memory convenience wrapper around the compress pipeline.
pub fn compress_bytes(data: &[u8], config: &PipelineConfig) -> Result<Vec<u8>, StreamError> {
    let codec = create_codec(config.codec, config.level)?;
    let mut out = Vec::new();
    run_compress_pipeline(&mut Cursor::new(data), &mut out, codec, config)?;
    Ok(out)
}

/// In-memory convenience wrapper around the decompress consumer.
pub fn decompress_bytes(data: &[u8], config: &PipelineConfig) -> Result<Vec<u8>, StreamError> {
    config.validate()?;
    let codec = create_codec(config.codec, config.level)?;
    let mut out = Vec::new();
    run_decompress_pipeline(Cursor::new(data), &mut out, codec, config.chunk_size)?;
    Ok(out)
}
