//! constants.rs
//! Stream-wide sizes shared by the chunker, the framing layer and the CLI.

/// Default chunk size (1 MiB), the unit of parallel work.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Max chunk size sanity bound (32 MiB).
pub const MAX_CHUNK_SIZE: usize = 32 * 1024 * 1024;

/// Byte width of the frame length prefix (`u32`, little-endian).
pub const FRAME_LEN_PREFIX: usize = 4;

/// Largest payload a single frame can describe.
pub const MAX_FRAME_PAYLOAD: usize = u32::MAX as usize;
