//! codecs/lz4.rs
//! LZ4 block codec (size-prepended blocks, no levels).
use byteorder::{ByteOrder, LittleEndian};
use lz4_flex::block::{compress_prepend_size, decompress_size_prepended};

use crate::compression::types::{Codec, CodecError, CodecKind};

pub struct Lz4Codec;

impl Lz4Codec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Lz4Codec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for Lz4Codec {
    fn kind(&self) -> CodecKind {
        CodecKind::Lz4
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        if input.is_empty() {
            return Ok(Vec::new());
        }
        Ok(compress_prepend_size(input))
    }

    fn decompress(&self, input: &[u8], max_size: usize) -> Result<Vec<u8>, CodecError> {
        if input.is_empty() {
            return Ok(Vec::new());
        }
        if input.len() < 4 {
            return Err(CodecError::Corrupt {
                codec: "lz4".into(),
                msg: "missing size prefix".into(),
            });
        }

        // Check the declared size before lz4_flex allocates for it
        let declared = LittleEndian::read_u32(&input[..4]) as usize;
        if declared > max_size {
            return Err(CodecError::OutputTooLarge { codec: "lz4".into(), max: max_size });
        }

        decompress_size_prepended(input)
            .map_err(|e| CodecError::Corrupt { codec: "lz4".into(), msg: e.to_string() })
    }
}
