//! Normalized I/O endpoints for the public API.

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::types::StreamError;

/// Canonical input abstraction
pub enum InputSource {
    Reader(Box<dyn Read + Send>),
    File(PathBuf),
    Memory(Vec<u8>),
}

/// Canonical output abstraction
pub enum OutputSink {
    Writer(Box<dyn Write + Send>),
    File(PathBuf),
    Memory,
}

/// In-memory output shared between the pipeline and the caller.
pub type SharedBuffer = Arc<Mutex<Vec<u8>>>;

/// Normalize input source into a boxed reader
pub fn open_input(src: InputSource) -> Result<Box<dyn Read + Send>, StreamError> {
    let reader: Box<dyn Read + Send> = match src {
        InputSource::Reader(r) => r,
        InputSource::File(p) => Box::new(BufReader::new(File::open(p)?)),
        InputSource::Memory(b) => Box::new(Cursor::new(b)),
    };
    Ok(reader)
}

/// Normalize output sink into a boxed writer.
///
/// With `capture` set, `OutputSink::Memory` also hands back the buffer the
/// writer fills, so callers can read the output once the pipeline returns.
pub fn open_output(
    sink: OutputSink,
    capture: bool,
) -> Result<(Box<dyn Write + Send>, Option<SharedBuffer>), StreamError> {
    match sink {
        OutputSink::Writer(w) => Ok((w, None)),
        OutputSink::File(p) => Ok((Box::new(BufWriter::new(File::create(p)?)), None)),
        OutputSink::Memory => {
            if capture {
                let buf = Arc::new(Mutex::new(Vec::new()));
                let writer = SharedBufferWriter { buf: buf.clone() };
                Ok((Box::new(writer), Some(buf)))
            } else {
                Ok((Box::new(std::io::sink()), None))
            }
        }
    }
}

pub struct SharedBufferWriter {
    buf: SharedBuffer,
}

impl Write for SharedBufferWriter {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        let mut guard = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        guard.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Copy the captured bytes out of a shared buffer.
pub fn take_buffer(buf: &SharedBuffer) -> Vec<u8> {
    std::mem::take(&mut *buf.lock().unwrap_or_else(PoisonError::into_inner))
}
