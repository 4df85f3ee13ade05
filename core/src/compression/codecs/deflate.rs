//! Deflate (zlib wrapper) via flate2.
//!
//! Each chunk is encoded as its own complete zlib stream, so any frame can
//! be decoded without its neighbours.

use std::io::Write;
use flate2::{Compression, write::ZlibEncoder, read::ZlibDecoder};

use crate::compression::codecs::read_bounded;
use crate::compression::types::{Codec, CodecError, CodecKind};

pub struct DeflateCodec {
    level: Compression,
}

impl DeflateCodec {
    pub fn new(level: i32) -> Result<Self, CodecError> {
        CodecKind::Deflate.check_level(level)?;
        Ok(Self { level: Compression::new(level as u32) })
    }
}

impl Codec for DeflateCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Deflate
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        if input.is_empty() {
            return Ok(Vec::new());
        }
        let mut enc = ZlibEncoder::new(Vec::with_capacity(input.len() / 2), self.level);
        enc.write_all(input)
            .map_err(|e| CodecError::Process { codec: "deflate".into(), msg: e.to_string() })?;
        enc.finish()
            .map_err(|e| CodecError::Process { codec: "deflate".into(), msg: e.to_string() })
    }

    fn decompress(&self, input: &[u8], max_size: usize) -> Result<Vec<u8>, CodecError> {
        if input.is_empty() {
            return Ok(Vec::new());
        }
        let dec = ZlibDecoder::new(input);
        read_bounded(dec, max_size, "deflate")
    }
}

