//! Random-access reads of chunk-aligned record ranges.
//!
//! Chunk `i` starts at byte `i * chunk_capacity * RECORD_SIZE` and holds up
//! to `chunk_capacity` records. Only the last chunk of a file may be short.

use super::{batch_buffer_len, read_full};
use crate::record::{decode_into, TraceRecord, RECORD_SIZE};
use crate::utils::error::TraceError;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Number of records in a trace of `len` bytes
///
/// # Errors
/// * `TraceError::CorruptTraceLength` - `len` is not a whole number of records
pub fn record_count_for_len(len: u64) -> Result<u64, TraceError> {
    if len % RECORD_SIZE as u64 != 0 {
        return Err(TraceError::CorruptTraceLength {
            len,
            record_size: RECORD_SIZE,
        });
    }
    Ok(len / RECORD_SIZE as u64)
}

/// `ceil(total_records / chunk_capacity)`
pub fn chunk_count(total_records: u64, chunk_capacity: usize) -> usize {
    let capacity = chunk_capacity.max(1) as u64;
    total_records.div_ceil(capacity) as usize
}

/// Byte offset of a chunk
pub fn chunk_offset(index: usize, chunk_capacity: usize) -> u64 {
    index as u64 * chunk_capacity as u64 * RECORD_SIZE as u64
}

/// Seekable reader that loads one chunk at a time
///
/// Each aggregation worker owns one of these over its own file handle, so
/// seek positions are never shared.
pub struct ChunkReader<R> {
    source: R,
    chunk_capacity: usize,
    buf: Vec<u8>,
}

impl ChunkReader<File> {
    pub fn open(path: impl AsRef<Path>, chunk_capacity: usize) -> Result<Self, TraceError> {
        let file = File::open(path)?;
        Self::new(file, chunk_capacity)
    }
}

impl<R: Read + Seek> ChunkReader<R> {
    pub fn new(source: R, chunk_capacity: usize) -> Result<Self, TraceError> {
        let buf = vec![0u8; batch_buffer_len(chunk_capacity)?];
        Ok(Self {
            source,
            chunk_capacity: chunk_capacity.max(1),
            buf,
        })
    }

    /// Replace `out` with the records of chunk `index`
    ///
    /// Returns the number of records read; 0 for a chunk past the end.
    pub fn read_chunk(
        &mut self,
        index: usize,
        out: &mut Vec<TraceRecord>,
    ) -> Result<usize, TraceError> {
        out.clear();
        let offset = chunk_offset(index, self.chunk_capacity);
        self.source.seek(SeekFrom::Start(offset))?;

        let filled = read_full(&mut self.source, &mut self.buf)?;
        if filled % RECORD_SIZE != 0 {
            return Err(TraceError::CorruptTraceLength {
                len: offset + filled as u64,
                record_size: RECORD_SIZE,
            });
        }

        Ok(decode_into(&self.buf[..filled], out))
    }
}
