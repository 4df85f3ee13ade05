//! Chunk reader: buffers the whole input and splits it into ordered chunks.

use std::io::Read;
use bytes::Bytes;
use tracing::debug;

use crate::constants::MAX_CHUNK_SIZE;
use crate::stream::types::Chunk;
use crate::types::StreamError;

fn check_chunk_size(chunk_size: usize) -> Result<(), StreamError> {
    if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE {
        return Err(StreamError::Validation(format!(
            "chunk size {chunk_size} out of range 1..={MAX_CHUNK_SIZE}"
        )));
    }
    Ok(())
}

/// Read `r` to EOF and split it into `chunk_size` chunks.
///
/// Empty input yields an empty vector, which callers treat as success.
pub fn read_chunks<R: Read + ?Sized>(r: &mut R, chunk_size: usize) -> Result<Vec<Chunk>, StreamError> {
    check_chunk_size(chunk_size)?;
    let mut buf = Vec::new();
    r.read_to_end(&mut buf)?;
    debug!("[CHUNKER] read {} bytes", buf.len());
    split_into_chunks(Bytes::from(buf), chunk_size)
}

/// Split an in-memory buffer without copying; chunks share `data`'s allocation.
///
/// Every chunk but the last is exactly `chunk_size` bytes; the last is non-empty.
pub fn split_into_chunks(data: Bytes, chunk_size: usize) -> Result<Vec<Chunk>, StreamError> {
    check_chunk_size(chunk_size)?;
    let count = expected_chunk_count(data.len(), chunk_size);
    let mut chunks = Vec::with_capacity(count);

    let mut off = 0;
    while off < data.len() {
        let end = (off + chunk_size).min(data.len());
        chunks.push(Chunk {
            id: chunks.len() as u64,
            payload: data.slice(off..end),
        });
        off = end;
    }

    debug!("[CHUNKER] split into {} chunks of up to {} bytes", chunks.len(), chunk_size);
    Ok(chunks)
}

/// `ceil(len / chunk_size)`; zero for empty input.
pub fn expected_chunk_count(len: usize, chunk_size: usize) -> usize {
    if chunk_size == 0 {
        return 0;
    }
    len.div_ceil(chunk_size)
}
