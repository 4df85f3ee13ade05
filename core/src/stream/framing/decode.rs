use std::io::{ErrorKind, Read};
use byteorder::{ByteOrder, LittleEndian};

use crate::constants::FRAME_LEN_PREFIX;
use crate::stream::framing::types::{Frame, FrameError, FrameView};

/// Fill `buf` as far as the reader allows; returns the bytes read.
fn read_full<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> Result<usize, FrameError> {
    let mut off = 0;
    while off < buf.len() {
        match r.read(&mut buf[off..]) {
            Ok(0) => break,
            Ok(n) => off += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(FrameError::Io(e)),
        }
    }
    Ok(off)
}

/// Read the next frame.
///
/// - `Ok(None)`: clean end of stream exactly at a frame boundary.
/// - `TruncatedLength`: EOF inside the 4-byte prefix.
/// - `TruncatedPayload`: EOF before `length` payload bytes arrived.
pub fn read_frame<R: Read + ?Sized>(r: &mut R) -> Result<Option<Frame>, FrameError> {
    let mut len_buf = [0u8; FRAME_LEN_PREFIX];
    let got = read_full(r, &mut len_buf)?;
    if got == 0 {
        return Ok(None);
    }
    if got < FRAME_LEN_PREFIX {
        return Err(FrameError::TruncatedLength { actual: got });
    }

    let expected = LittleEndian::read_u32(&len_buf) as usize;

    // Grow with the data actually present; a forged length cannot force a huge allocation.
    let mut payload = Vec::new();
    (&mut *r).take(expected as u64).read_to_end(&mut payload)?;
    if payload.len() < expected {
        return Err(FrameError::TruncatedPayload { expected, actual: payload.len() });
    }

    Ok(Some(Frame::new(payload)))
}

/// Decode one frame from the front of `wire`, returning it and the remainder.
///
/// Zero-copy: the view borrows from `wire`.
pub fn decode_frame(wire: &[u8]) -> Result<(FrameView<'_>, &[u8]), FrameError> {
    if wire.len() < FRAME_LEN_PREFIX {
        return Err(FrameError::TruncatedLength { actual: wire.len() });
    }
    let expected = LittleEndian::read_u32(&wire[..FRAME_LEN_PREFIX]) as usize;
    let body = &wire[FRAME_LEN_PREFIX..];
    if body.len() < expected {
        return Err(FrameError::TruncatedPayload { expected, actual: body.len() });
    }
    let (payload, rest) = body.split_at(expected);
    Ok((FrameView { payload }, rest))
}

/// Split a whole in-memory stream into frame views, failing on any trailing fragment.
pub fn decode_all(mut wire: &[u8]) -> Result<Vec<FrameView<'_>>, FrameError> {
    let mut frames = Vec::new();
    while !wire.is_empty() {
        let (view, rest) = decode_frame(wire)?;
        frames.push(view);
        wire = rest;
    }
    Ok(frames)
}

/// Iterator over the frames of a stream, tracking the current frame index.
pub struct FrameReader<R: Read> {
    inner: R,
    index: u64,
    done: bool,
}

impl<R: Read> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, index: 0, done: false }
    }

    /// Index of the next frame to be read (= frames read so far).
    pub fn index(&self) -> u64 {
        self.index
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = Result<Frame, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match read_frame(&mut self.inner) {
            Ok(Some(frame)) => {
                self.index += 1;
                Some(Ok(frame))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
