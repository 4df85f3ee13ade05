//! compression/codecs/mod.rs
//! Concrete codecs behind the `Codec` trait.

use std::io::Read;

use crate::compression::types::CodecError;

pub mod deflate;
pub mod lz4;
pub mod zstd;

pub use self::deflate::*;
pub use self::lz4::*;
pub use self::zstd::*;

/// Drain a decoder, failing once the output passes `max_size`.
///
/// Reads at most `max_size + 1` bytes so a hostile payload never inflates
/// past the bound in memory.
pub(crate) fn read_bounded<R: Read>(
    dec: R,
    max_size: usize,
    codec: &str,
) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    dec.take(max_size as u64 + 1)
        .read_to_end(&mut out)
        .map_err(|e| CodecError::Corrupt { codec: codec.into(), msg: e.to_string() })?;

    if out.len() > max_size {
        return Err(CodecError::OutputTooLarge { codec: codec.into(), max: max_size });
    }
    Ok(out)
}
