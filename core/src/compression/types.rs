//! compression/types.rs
//! Codec identifiers, the codec capability trait and its error type.
use std::fmt;
use num_enum::TryFromPrimitive;

use crate::compression::constants::{
    codec_ids, DEFAULT_LEVEL_DEFLATE, DEFAULT_LEVEL_LZ4, DEFAULT_LEVEL_ZSTD,
    LEVEL_RANGE_DEFLATE, LEVEL_RANGE_ZSTD,
};

/// Codec selector. Never written to the stream.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum CodecKind {
    Deflate = codec_ids::DEFLATE,
    Zstd    = codec_ids::ZSTD,
    Lz4     = codec_ids::LZ4,
}

impl Default for CodecKind {
    fn default() -> Self {
        CodecKind::Deflate
    }
}

impl CodecKind {
    pub fn verify(raw: u16) -> Result<Self, CodecError> {
        CodecKind::try_from_primitive(raw).map_err(|_| CodecError::UnknownCodec { raw })
    }

    /// Parse a user-facing codec name. `zlib` is accepted as an alias of `deflate`.
    pub fn from_name(name: &str) -> Result<Self, CodecError> {
        match name.to_ascii_lowercase().as_str() {
            "deflate" | "zlib" => Ok(CodecKind::Deflate),
            "zstd" => Ok(CodecKind::Zstd),
            "lz4" => Ok(CodecKind::Lz4),
            other => Err(CodecError::UnknownCodecName { name: other.to_string() }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CodecKind::Deflate => "deflate",
            CodecKind::Zstd => "zstd",
            CodecKind::Lz4 => "lz4",
        }
    }

    pub fn default_level(self) -> i32 {
        match self {
            CodecKind::Deflate => DEFAULT_LEVEL_DEFLATE,
            CodecKind::Zstd => DEFAULT_LEVEL_ZSTD,
            CodecKind::Lz4 => DEFAULT_LEVEL_LZ4,
        }
    }

    /// Reject levels the codec cannot honour. LZ4 block mode ignores levels entirely.
    pub fn check_level(self, level: i32) -> Result<(), CodecError> {
        let range = match self {
            CodecKind::Deflate => LEVEL_RANGE_DEFLATE,
            CodecKind::Zstd => LEVEL_RANGE_ZSTD,
            CodecKind::Lz4 => return Ok(()),
        };
        if level < range.0 || level > range.1 {
            return Err(CodecError::InvalidLevel { codec: self.name().into(), level });
        }
        Ok(())
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

#[derive(Debug)]
pub enum CodecError {
    UnknownCodec { raw: u16 },
    UnknownCodecName { name: String },
    InvalidLevel { codec: String, level: i32 },
    /// Encoder failed on well-formed input.
    Process { codec: String, msg: String },
    /// Decoder rejected the payload.
    Corrupt { codec: String, msg: String },
    /// Decoded chunk would exceed the configured maximum.
    OutputTooLarge { codec: String, max: usize },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CodecError::*;
        match self {
            UnknownCodec { raw } =>
                write!(f, "unknown codec: {}", enum_name_or_hex::<CodecKind>(*raw)),
            UnknownCodecName { name } =>
                write!(f, "unknown codec name: {:?} (expected deflate, zlib, zstd or lz4)", name),
            InvalidLevel { codec, level } =>
                write!(f, "invalid level {} for codec {}", level, codec),
            Process { codec, msg } =>
                write!(f, "codec {} process failed: {}", codec, msg),
            Corrupt { codec, msg } =>
                write!(f, "codec {} rejected payload: {}", codec, msg),
            OutputTooLarge { codec, max } =>
                write!(f, "codec {} output exceeds maximum chunk size {}", codec, max),
        }
    }
}

impl std::error::Error for CodecError {}

/// Lossless compression primitive over whole byte buffers.
///
/// Implementations hold no per-call state, so a single instance is shared
/// by every worker of the pool.
pub trait Codec: Send + Sync {
    fn kind(&self) -> CodecKind;

    /// Compress one chunk into a self-contained payload.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Decompress one payload. Output larger than `max_size` is an error.
    fn decompress(&self, input: &[u8], max_size: usize) -> Result<Vec<u8>, CodecError>;

    fn name(&self) -> &'static str {
        self.kind().name()
    }
}
