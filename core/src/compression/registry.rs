//! compression/registry.rs
//! Codec registry and factory functions.

use std::sync::Arc;

use crate::compression::codecs::{DeflateCodec, Lz4Codec, ZstdCodec};
use crate::compression::types::{Codec, CodecError, CodecKind};

pub struct CodecInfo {
    pub kind: CodecKind,
    pub name: &'static str,
    pub default_level: i32,
    pub supports_level: bool,
}

pub fn resolve(codec_id: u16) -> Result<CodecInfo, CodecError> {
    let kind = CodecKind::verify(codec_id)?;
    Ok(CodecInfo {
        kind,
        name: kind.name(),
        default_level: kind.default_level(),
        supports_level: kind != CodecKind::Lz4,
    })
}

/// Build a shareable codec. `None` selects the codec's default level.
pub fn create_codec(kind: CodecKind, level: Option<i32>) -> Result<Arc<dyn Codec>, CodecError> {
    let level = level.unwrap_or_else(|| kind.default_level());
    match kind {
        CodecKind::Deflate => Ok(Arc::new(DeflateCodec::new(level)?)),
        CodecKind::Zstd => Ok(Arc::new(ZstdCodec::new(level)?)),
        CodecKind::Lz4 => Ok(Arc::new(Lz4Codec::new())),
    }
}

pub fn create_codec_by_id(codec_id: u16, level: Option<i32>) -> Result<Arc<dyn Codec>, CodecError> {
    create_codec(CodecKind::verify(codec_id)?, level)
}
