use std::fmt;
use std::io;
use bytes::Bytes;

use crate::constants::FRAME_LEN_PREFIX;

/// One on-wire record: `[u32 LE length][length bytes]`.
///
/// No chunk id is stored; a frame's position in the stream is its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub payload: Bytes,
}

impl Frame {
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self { payload: payload.into() }
    }

    /// Length prefix as written on the wire.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Borrowed view over a frame inside an in-memory stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameView<'a> {
    pub payload: &'a [u8],
}

#[derive(Debug)]
pub enum FrameError {
    /// Stream ended inside a length prefix.
    TruncatedLength { actual: usize },
    /// Stream ended inside a payload.
    TruncatedPayload { expected: usize, actual: usize },
    /// Payload does not fit a u32 length prefix.
    PayloadTooLarge { len: usize },
    Io(io::Error),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FrameError::*;
        match self {
            TruncatedLength { actual } =>
                write!(f, "truncated length prefix: got {} of {} bytes", actual, FRAME_LEN_PREFIX),
            TruncatedPayload { expected, actual } =>
                write!(f, "truncated payload: expected {} bytes, got {}", expected, actual),
            PayloadTooLarge { len } =>
                write!(f, "payload of {} bytes exceeds u32 length prefix", len),
            Io(e) =>
                write!(f, "frame I/O error: {}", e),
        }
    }
}

impl std::error::Error for FrameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FrameError {
    fn from(e: io::Error) -> Self {
        FrameError::Io(e)
    }
}
