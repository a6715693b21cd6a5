//! Binary trace writer.
//!
//! Produces files in the same fixed-record format the readers consume.

use crate::record::TraceRecord;
use log::debug;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Buffered sink for encoded records
pub struct TraceWriter<W: Write> {
    sink: BufWriter<W>,
    records_written: u64,
}

impl TraceWriter<File> {
    /// Create (or truncate) a trace file
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        debug!("Creating trace file: {}", path.display());
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> TraceWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: BufWriter::new(sink),
            records_written: 0,
        }
    }

    /// Append one record
    pub fn write_record(&mut self, record: &TraceRecord) -> io::Result<()> {
        self.sink.write_all(&record.encode())?;
        self.records_written += 1;
        Ok(())
    }

    /// Append records in order
    pub fn write_all(&mut self, records: &[TraceRecord]) -> io::Result<()> {
        records.iter().try_for_each(|r| self.write_record(r))
    }

    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Flush buffered records and hand back the underlying sink
    pub fn finish(self) -> io::Result<W> {
        self.sink.into_inner().map_err(|e| e.into_error())
    }
}

/// Write a complete trace file in one go
pub fn write_trace(path: impl AsRef<Path>, records: &[TraceRecord]) -> io::Result<()> {
    let mut writer = TraceWriter::create(path)?;
    writer.write_all(records)?;
    writer.finish()?.sync_all()
}
