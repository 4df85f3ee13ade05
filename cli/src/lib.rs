//! chunkpress-cli
//!
//! Argument parsing, logging setup and file handling shared by the
//! `compress` and `decompress` binaries. Exit code is 0 on success and 1 on
//! any usage, I/O, codec or format error.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use chunkpress_core::compression::CodecKind;
use chunkpress_core::constants::DEFAULT_CHUNK_SIZE;
use chunkpress_core::stream::{
    compress_stream, decompress_stream, ApiConfig, InputSource, OutputSink, PipelineConfig,
};
use chunkpress_core::telemetry::{Stage, TelemetrySnapshot};
use chunkpress_core::types::StreamError;

#[derive(Parser, Debug)]
#[command(name = "compress")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compress a file into independently decodable chunks", long_about = None)]
pub struct CompressArgs {
    /// Input file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Chunk size in bytes
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Number of worker threads (default: hardware concurrency)
    #[arg(short = 't', long)]
    pub workers: Option<usize>,

    /// Codec: deflate (zlib), zstd or lz4
    #[arg(long, default_value = "deflate")]
    pub codec: String,

    /// Compression level (default: codec default)
    #[arg(long)]
    pub level: Option<i32>,

    /// Print run telemetry as JSON on stdout
    #[arg(long)]
    pub stats: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Parser, Debug)]
#[command(name = "decompress")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Restore a file written by `compress`", long_about = None)]
pub struct DecompressArgs {
    /// Compressed input file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Maximum decoded chunk size; must be at least the compressor's chunk size
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Codec the stream was written with
    #[arg(long, default_value = "deflate")]
    pub codec: String,

    /// Print run telemetry as JSON on stdout
    #[arg(long)]
    pub stats: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Install the stderr tracing subscriber. `RUST_LOG` wins over `quiet`.
pub fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Parse arguments, printing clap's message on failure.
///
/// `--help`/`--version` exit 0; real usage errors exit 1.
pub fn parse_or_exit<T: Parser>() -> std::result::Result<T, ExitCode> {
    T::try_parse().map_err(|e| {
        let _ = e.print();
        if e.use_stderr() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    })
}

/// Print the error chain to stderr and map it to exit code 1.
pub fn report(err: &anyhow::Error) -> ExitCode {
    eprintln!("error: {err:#}");
    ExitCode::FAILURE
}

fn parse_codec(name: &str) -> Result<CodecKind> {
    CodecKind::from_name(name)
        .map_err(|e| StreamError::Usage(e.to_string()))
        .context("invalid --codec")
}

/// Refuse to run when `output` names the same file as `input`.
///
/// Creating the output would truncate the input before it is read.
fn check_distinct_paths(input: &Path, output: &Path) -> Result<()> {
    let (Ok(a), Ok(b)) = (fs::canonicalize(input), fs::canonicalize(output)) else {
        return Ok(());
    };
    if a == b {
        return Err(StreamError::Usage(format!(
            "input and output are the same file: {}",
            a.display()
        ))
        .into());
    }
    Ok(())
}

/// Create `path`, run `f` on it, and remove the file again if `f` fails.
fn with_output_file<T>(path: &Path, f: impl FnOnce(File) -> Result<T>) -> Result<T> {
    let file = File::create(path)
        .with_context(|| format!("could not open output file {}", path.display()))?;

    f(file).map_err(|e| {
        if let Err(rm) = fs::remove_file(path) {
            warn!("could not remove incomplete output {}: {rm}", path.display());
        } else {
            warn!("removed incomplete output {}", path.display());
        }
        e
    })
}

fn emit_stats(enabled: bool, snapshot: &TelemetrySnapshot) -> Result<()> {
    const STAGES: [Stage; 5] = [Stage::Read, Stage::Compress, Stage::Reorder, Stage::Write, Stage::Decompress];
    for stage in STAGES.into_iter().filter(|s| snapshot.has_all_stages(&[*s])) {
        debug!("stage {stage}: {:.3} ms", snapshot.stage_times.get_ms(stage));
    }
    if enabled {
        println!("{}", snapshot.to_json().context("could not serialize telemetry")?);
    }
    Ok(())
}

pub fn run_compress(args: &CompressArgs) -> Result<TelemetrySnapshot> {
    let config = PipelineConfig::new(args.chunk_size, args.workers, parse_codec(&args.codec)?, args.level);
    config.validate().map_err(|e| StreamError::Usage(e.to_string()))?;
    check_distinct_paths(&args.input, &args.output)?;

    let input = File::open(&args.input)
        .with_context(|| format!("could not open input file {}", args.input.display()))?;

    let snapshot = with_output_file(&args.output, |out| {
        compress_stream(
            InputSource::Reader(Box::new(BufReader::new(input))),
            OutputSink::Writer(Box::new(BufWriter::new(out))),
            &config,
            ApiConfig::default(),
        )
        .with_context(|| format!("compression of {} failed", args.input.display()))
    })?;

    if snapshot.chunks == 0 {
        info!("input file is empty, nothing to compress");
    } else {
        info!(
            "compressed {} bytes into {} bytes ({} chunks, {} workers)",
            snapshot.bytes_input, snapshot.bytes_output, snapshot.chunks, snapshot.workers
        );
    }
    emit_stats(args.stats, &snapshot)?;
    Ok(snapshot)
}

pub fn run_decompress(args: &DecompressArgs) -> Result<TelemetrySnapshot> {
    let config = PipelineConfig::new(args.chunk_size, None, parse_codec(&args.codec)?, None);
    config.validate().map_err(|e| StreamError::Usage(e.to_string()))?;
    check_distinct_paths(&args.input, &args.output)?;

    let input = File::open(&args.input)
        .with_context(|| format!("could not open input file {}", args.input.display()))?;

    let snapshot = with_output_file(&args.output, |out| {
        decompress_stream(
            InputSource::Reader(Box::new(BufReader::new(input))),
            OutputSink::Writer(Box::new(BufWriter::new(out))),
            &config,
            ApiConfig::default(),
        )
        .with_context(|| format!("decompression of {} failed", args.input.display()))
    })?;

    info!(
        "decompressed {} frames into {} bytes, output written to {}",
        snapshot.frames, snapshot.bytes_output, args.output.display()
    );
    emit_stats(args.stats, &snapshot)?;
    Ok(snapshot)
}
