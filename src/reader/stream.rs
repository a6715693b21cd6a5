//! Sequential, batched decoding of a record stream.
//!
//! The reader pulls `chunk_capacity` records' worth of bytes per batch from
//! any `Read` source. It has no notion of files; the validator and extractor
//! use it over files, tests use it over in-memory buffers.

use super::{batch_buffer_len, read_full};
use crate::record::{decode_into, TraceRecord, RECORD_SIZE};
use crate::utils::error::TraceError;
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Lazy batch reader over a byte source
pub struct RecordReader<R> {
    source: R,
    buf: Vec<u8>,
    bytes_read: u64,
    records_read: u64,
    exhausted: bool,
}

impl RecordReader<File> {
    /// Open a trace file for sequential reading
    pub fn open(path: impl AsRef<Path>, chunk_capacity: usize) -> Result<Self, TraceError> {
        let path = path.as_ref();
        debug!("Opening trace for sequential read: {}", path.display());
        let file = File::open(path)?;
        Self::new(file, chunk_capacity)
    }
}

impl<R: Read> RecordReader<R> {
    /// Wrap a byte source; a zero capacity is treated as one record per batch
    ///
    /// # Errors
    /// * `TraceError::InvalidChunkCapacity` - capacity too large for one buffer
    pub fn new(source: R, chunk_capacity: usize) -> Result<Self, TraceError> {
        Ok(Self {
            source,
            buf: vec![0u8; batch_buffer_len(chunk_capacity)?],
            bytes_read: 0,
            records_read: 0,
            exhausted: false,
        })
    }

    /// Replace `out` with the next batch of records
    ///
    /// Returns the batch length. The final batch may be short, and every call
    /// after the end of the source returns 0.
    ///
    /// # Errors
    /// * `TraceError::CorruptTraceLength` - source ends inside a record
    /// * `TraceError::Io` - read failure
    pub fn read_batch(&mut self, out: &mut Vec<TraceRecord>) -> Result<usize, TraceError> {
        out.clear();
        if self.exhausted {
            return Ok(0);
        }

        let filled = read_full(&mut self.source, &mut self.buf)?;
        self.bytes_read += filled as u64;

        if filled < self.buf.len() {
            self.exhausted = true;
            if filled % RECORD_SIZE != 0 {
                return Err(TraceError::CorruptTraceLength {
                    len: self.bytes_read,
                    record_size: RECORD_SIZE,
                });
            }
        }

        let count = decode_into(&self.buf[..filled], out);
        self.records_read += count as u64;
        Ok(count)
    }

    /// Records decoded so far
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Flatten the batches into a per-record iterator
    pub fn records(self) -> Records<R> {
        Records {
            reader: self,
            batch: Vec::new(),
            pos: 0,
            failed: false,
        }
    }
}

/// Record-at-a-time view of a [`RecordReader`]
///
/// Stops after the first error.
pub struct Records<R> {
    reader: RecordReader<R>,
    batch: Vec<TraceRecord>,
    pos: usize,
    failed: bool,
}

impl<R: Read> Iterator for Records<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if self.pos == self.batch.len() {
            self.pos = 0;
            match self.reader.read_batch(&mut self.batch) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }

        let record = self.batch[self.pos];
        self.pos += 1;
        Some(Ok(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::encode_all;
    use std::io::Cursor;

    fn sample(n: i64) -> Vec<TraceRecord> {
        (0..n).map(|i| TraceRecord::read(i * 8, 8)).collect()
    }

    #[test]
    fn test_batches_and_short_tail() {
        let bytes = encode_all(&sample(5));
        let mut reader = RecordReader::new(Cursor::new(bytes), 2).unwrap();
        let mut batch = Vec::new();

        assert_eq!(reader.read_batch(&mut batch).unwrap(), 2);
        assert_eq!(reader.read_batch(&mut batch).unwrap(), 2);
        assert_eq!(reader.read_batch(&mut batch).unwrap(), 1);
        assert_eq!(batch[0], TraceRecord::read(32, 8));
        assert_eq!(reader.read_batch(&mut batch).unwrap(), 0);
        assert!(batch.is_empty());
        assert_eq!(reader.records_read(), 5);
    }

    #[test]
    fn test_exact_multiple_ends_with_empty_batch() {
        let bytes = encode_all(&sample(4));
        let mut reader = RecordReader::new(Cursor::new(bytes), 2).unwrap();
        let mut batch = Vec::new();

        assert_eq!(reader.read_batch(&mut batch).unwrap(), 2);
        assert_eq!(reader.read_batch(&mut batch).unwrap(), 2);
        assert_eq!(reader.read_batch(&mut batch).unwrap(), 0);
    }

    #[test]
    fn test_empty_source() {
        let mut reader = RecordReader::new(Cursor::new(Vec::new()), 8).unwrap();
        let mut batch = Vec::new();
        assert_eq!(reader.read_batch(&mut batch).unwrap(), 0);
    }

    #[test]
    fn test_partial_record_is_corrupt() {
        let mut bytes = encode_all(&sample(3));
        bytes.truncate(bytes.len() - 3);

        let results: Vec<_> = RecordReader::new(Cursor::new(bytes), 2)
            .unwrap()
            .records()
            .collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_ok());
        assert!(matches!(
            results[2],
            Err(TraceError::CorruptTraceLength { len: 45, .. })
        ));
    }

    #[test]
    fn test_oversized_capacity_rejected() {
        assert!(matches!(
            RecordReader::new(Cursor::new(Vec::new()), usize::MAX),
            Err(TraceError::InvalidChunkCapacity { .. })
        ));
    }

    #[test]
    fn test_records_iterator_preserves_order() {
        let records = sample(7);
        let bytes = encode_all(&records);
        let decoded: Vec<_> = RecordReader::new(Cursor::new(bytes), 3)
            .unwrap()
            .records()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(decoded, records);
    }
}
