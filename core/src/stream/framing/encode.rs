use std::io::Write;
use byteorder::{LittleEndian, WriteBytesExt};

use crate::constants::{FRAME_LEN_PREFIX, MAX_FRAME_PAYLOAD};
use crate::stream::framing::types::FrameError;

/// Encode one payload into canonical wire format.
///
/// Layout:
///
/// ```text
/// [ length (4, LE) ]
/// [ payload (length) ]
/// ```
pub fn encode_frame(payload: &[u8]) -> Result<Vec<u8>, FrameError> {
    let mut out = Vec::with_capacity(FRAME_LEN_PREFIX + payload.len());
    write_frame(&mut out, payload)?;
    Ok(out)
}

/// Write one frame to `w`, returning the number of bytes written.
pub fn write_frame<W: Write + ?Sized>(w: &mut W, payload: &[u8]) -> Result<usize, FrameError> {
    if payload.len() > MAX_FRAME_PAYLOAD {
        return Err(FrameError::PayloadTooLarge { len: payload.len() });
    }
    w.write_u32::<LittleEndian>(payload.len() as u32)?;
    w.write_all(payload)?;
    Ok(FRAME_LEN_PREFIX + payload.len())
}

/// Sequential frame writer that keeps a running tally for telemetry.
pub struct FrameWriter<W: Write> {
    inner: W,
    frames: u64,
    bytes: u64,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, frames: 0, bytes: 0 }
    }

    pub fn write_frame(&mut self, payload: &[u8]) -> Result<usize, FrameError> {
        let n = write_frame(&mut self.inner, payload)?;
        self.frames += 1;
        self.bytes += n as u64;
        Ok(n)
    }

    pub fn frames_written(&self) -> u64 {
        self.frames
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes
    }

    pub fn flush(&mut self) -> Result<(), FrameError> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
