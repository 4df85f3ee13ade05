//! src/compression/codecs/zstd.rs
//!
//! Zstd codec.
//!
//! Design notes:
//! - Compression uses the bulk API; every payload is one complete zstd frame.
//! - Decompression goes through the streaming decoder so the output bound is
//!   enforced while decoding instead of after allocating.

use crate::compression::codecs::read_bounded;
use crate::compression::types::{Codec, CodecError, CodecKind};

pub struct ZstdCodec {
    level: i32,
}

impl ZstdCodec {
    /// Create a new Zstd codec with the given level.
    ///
    /// # Errors
    /// - Returns `CodecError::InvalidLevel` outside 1..=22.
    pub fn new(level: i32) -> Result<Self, CodecError> {
        CodecKind::Zstd.check_level(level)?;
        Ok(Self { level })
    }
}

impl Codec for ZstdCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Zstd
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        if input.is_empty() {
            return Ok(Vec::new());
        }
        ::zstd::bulk::compress(input, self.level)
            .map_err(|e| CodecError::Process { codec: "zstd".into(), msg: e.to_string() })
    }

    fn decompress(&self, input: &[u8], max_size: usize) -> Result<Vec<u8>, CodecError> {
        if input.is_empty() {
            return Ok(Vec::new());
        }
        let dec = ::zstd::stream::read::Decoder::with_buffer(input)
            .map_err(|e| CodecError::Corrupt { codec: "zstd".into(), msg: e.to_string() })?;
        read_bounded(dec, max_size, "zstd")
    }
}
