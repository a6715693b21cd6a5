//! Sub-trace extraction for a single invocation.
//!
//! The span opens at the first call that is not the very first record of the
//! trace and closes at the return matching that call. Only the memory
//! accesses in between (including those of nested calls) are copied; the
//! boundary call and return themselves are not.

use super::call_stack::CallStack;
use crate::output::TraceWriter;
use crate::reader::RecordReader;
use crate::record::{RecordKind, TraceRecord};
use crate::utils::error::TraceError;
use log::{debug, info};
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Result of a completed extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Address of the bounding call
    pub call_address: i64,

    /// Index of the bounding call record
    pub start_index: u64,

    /// Index of the matching return record
    pub end_index: u64,

    /// Records read from the input, up to and including the closing return
    pub records_examined: u64,

    /// Read/Write records written to the output
    pub records_extracted: u64,
}

#[derive(Debug, Clone, Copy)]
struct OpenSpan {
    address: i64,
    start_index: u64,
    /// Stack depth right after the bounding call was pushed
    depth: usize,
}

/// Single-pass span extractor writing into a record sink
pub struct Extractor<W: Write> {
    stack: CallStack,
    sink: TraceWriter<W>,
    records: u64,
    span: Option<OpenSpan>,
    closed_at: Option<u64>,
}

impl<W: Write> Extractor<W> {
    pub fn new(sink: W) -> Self {
        Self {
            stack: CallStack::new(),
            sink: TraceWriter::new(sink),
            records: 0,
            span: None,
            closed_at: None,
        }
    }

    /// Process one record
    ///
    /// Returns `true` once the bounding return has been seen; further records
    /// must not be fed after that.
    pub fn observe(&mut self, record: &TraceRecord) -> Result<bool, TraceError> {
        let index = self.records;
        let mut closed = false;

        match record.kind {
            RecordKind::Call => {
                self.stack.push(record.address);
                if self.span.is_none() && index > 0 {
                    debug!(
                        "Extraction starts at record {} (call to {:#x})",
                        index, record.address
                    );
                    self.span = Some(OpenSpan {
                        address: record.address,
                        start_index: index,
                        depth: self.stack.depth(),
                    });
                }
            }
            RecordKind::Return => {
                self.stack.pop_matching(record.address, index)?;
                if let Some(span) = self.span {
                    if self.stack.depth() + 1 == span.depth {
                        self.closed_at = Some(index);
                        closed = true;
                    }
                }
            }
            RecordKind::Read | RecordKind::Write => {
                if self.span.is_some() {
                    self.sink.write_record(record)?;
                }
            }
            RecordKind::Unknown(_) => {}
        }

        self.records += 1;
        Ok(closed)
    }

    /// Flush the output and report the span
    ///
    /// # Errors
    /// * `TraceError::NoTerminatingReturn` - the bounding call never returned
    ///   (or never occurred)
    pub fn finish(self) -> Result<(ExtractionSummary, W), TraceError> {
        let (span, end_index) = match (self.span, self.closed_at) {
            (Some(span), Some(end)) => (span, end),
            _ => {
                return Err(TraceError::NoTerminatingReturn {
                    processed: self.records,
                    depth: self.stack.depth(),
                })
            }
        };

        let records_extracted = self.sink.records_written();
        let sink = self.sink.finish()?;

        Ok((
            ExtractionSummary {
                call_address: span.address,
                start_index: span.start_index,
                end_index,
                records_examined: self.records,
                records_extracted,
            },
            sink,
        ))
    }

    /// Run over a reader, stopping at the closing return
    pub fn extract<R: Read>(
        mut self,
        mut reader: RecordReader<R>,
    ) -> Result<(ExtractionSummary, W), TraceError> {
        let mut batch = Vec::new();
        while reader.read_batch(&mut batch)? > 0 {
            for record in &batch {
                if self.observe(record)? {
                    return self.finish();
                }
            }
        }
        self.finish()
    }
}

/// Extract from in-memory records
pub fn extract_records(
    records: &[TraceRecord],
) -> Result<(ExtractionSummary, Vec<TraceRecord>), TraceError> {
    let mut extractor = Extractor::new(Vec::new());
    for record in records {
        if extractor.observe(record)? {
            break;
        }
    }

    let (summary, bytes) = extractor.finish()?;
    let mut out = Vec::with_capacity(summary.records_extracted as usize);
    crate::record::decode_into(&bytes, &mut out);
    Ok((summary, out))
}

/// Extract the span of `input` into the trace file `output`
///
/// The output is staged in a temporary file beside the destination and only
/// moved into place on success; on failure no output file is left behind.
pub fn extract_span(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    chunk_capacity: usize,
) -> Result<ExtractionSummary, TraceError> {
    let input = input.as_ref();
    let output = output.as_ref();
    debug!("Extracting span: {} -> {}", input.display(), output.display());

    let reader = RecordReader::open(input, chunk_capacity)?;

    let staging_dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staged = NamedTempFile::new_in(staging_dir)?;

    let (summary, staged) = Extractor::new(staged).extract(reader)?;
    staged.as_file().sync_all()?;
    staged.persist(output).map_err(|e| TraceError::Io(e.error))?;

    info!("Number of processed trace entries: {}", summary.records_examined);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_call_does_not_qualify() {
        let trace = [
            TraceRecord::call(10),
            TraceRecord::read(100, 4),
            TraceRecord::write(104, 4),
            TraceRecord::read(100, 4),
            TraceRecord::ret(10),
        ];

        assert!(matches!(
            extract_records(&trace),
            Err(TraceError::NoTerminatingReturn { processed: 5, depth: 0 })
        ));
    }

    #[test]
    fn test_simple_span() {
        let trace = [
            TraceRecord::read(0, 1),
            TraceRecord::call(10),
            TraceRecord::read(100, 4),
            TraceRecord::ret(10),
        ];

        let (summary, out) = extract_records(&trace).unwrap();
        assert_eq!(out, vec![TraceRecord::read(100, 4)]);
        assert_eq!(summary.call_address, 10);
        assert_eq!(summary.start_index, 1);
        assert_eq!(summary.end_index, 3);
        assert_eq!(summary.records_examined, 4);
    }

    #[test]
    fn test_nested_call_inside_span() {
        let trace = [
            TraceRecord::write(0, 8),
            TraceRecord::call(10),
            TraceRecord::read(1, 4),
            TraceRecord::call(20),
            TraceRecord::write(2, 4),
            TraceRecord::ret(20),
            TraceRecord::read(3, 4),
            TraceRecord::ret(10),
            TraceRecord::read(4, 4),
        ];

        let (summary, out) = extract_records(&trace).unwrap();
        assert_eq!(
            out,
            vec![
                TraceRecord::read(1, 4),
                TraceRecord::write(2, 4),
                TraceRecord::read(3, 4),
            ]
        );
        assert_eq!(summary.end_index, 7);
    }

    #[test]
    fn test_span_inside_leading_call() {
        let trace = [
            TraceRecord::call(1),
            TraceRecord::read(5, 1),
            TraceRecord::call(2),
            TraceRecord::read(6, 1),
            TraceRecord::ret(2),
            TraceRecord::read(7, 1),
            TraceRecord::ret(1),
        ];

        let (summary, out) = extract_records(&trace).unwrap();
        assert_eq!(summary.call_address, 2);
        assert_eq!(out, vec![TraceRecord::read(6, 1)]);
    }

    #[test]
    fn test_mismatch_inside_span() {
        let trace = [
            TraceRecord::read(0, 1),
            TraceRecord::call(10),
            TraceRecord::ret(11),
        ];

        assert!(matches!(
            extract_records(&trace),
            Err(TraceError::MismatchedReturn { index: 2, expected: 10, found: 11 })
        ));
    }

    #[test]
    fn test_unclosed_span() {
        let trace = [
            TraceRecord::read(0, 1),
            TraceRecord::call(10),
            TraceRecord::read(1, 1),
        ];

        assert!(matches!(
            extract_records(&trace),
            Err(TraceError::NoTerminatingReturn { processed: 3, depth: 1 })
        ));
    }
}
