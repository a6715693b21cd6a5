//! Record stream readers.
//!
//! - `stream`: sequential batches for single-pass consumers
//! - `chunked`: seek-and-read of chunk-aligned ranges for parallel workers

pub mod chunked;
pub mod stream;

pub use chunked::{chunk_count, chunk_offset, record_count_for_len, ChunkReader};
pub use stream::{RecordReader, Records};

use crate::record::RECORD_SIZE;
use crate::utils::config::MAX_CHUNK_CAPACITY;
use crate::utils::error::TraceError;
use std::io::{self, Read};

/// Byte length of a read buffer holding `chunk_capacity` records
///
/// A capacity of 0 is treated as 1.
///
/// # Errors
/// * `TraceError::InvalidChunkCapacity` - above `MAX_CHUNK_CAPACITY`
pub fn batch_buffer_len(chunk_capacity: usize) -> Result<usize, TraceError> {
    let capacity = chunk_capacity.max(1);
    let invalid = TraceError::InvalidChunkCapacity {
        capacity: chunk_capacity,
        max: MAX_CHUNK_CAPACITY,
    };
    if capacity > MAX_CHUNK_CAPACITY {
        return Err(invalid);
    }
    capacity.checked_mul(RECORD_SIZE).ok_or(invalid)
}

/// Read until `buf` is full or the source is exhausted
fn read_full<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
