//! Call/return structure validation.
//!
//! A trace is well formed when its calls and returns serialize a call tree:
//! every return matches the most recent unmatched call, and nothing is left
//! open at the end.

use super::call_stack::CallStack;
use crate::reader::RecordReader;
use crate::record::{RecordKind, TraceRecord};
use crate::utils::error::TraceError;
use log::{debug, info};
use std::io::Read;
use std::path::Path;

/// Outcome of a successful validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSummary {
    /// Records examined
    pub records: u64,

    pub calls: u64,

    /// Deepest call nesting seen
    pub max_depth: usize,
}

/// Single-pass structural validator
///
/// Feed records with [`Validator::observe`] and close the pass with
/// [`Validator::finish`], or run a whole source with [`Validator::validate`].
#[derive(Debug, Default)]
pub struct Validator {
    stack: CallStack,
    records: u64,
    calls: u64,
    max_depth: usize,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check one record against the pending calls
    pub fn observe(&mut self, record: &TraceRecord) -> Result<(), TraceError> {
        match record.kind {
            RecordKind::Call => {
                self.stack.push(record.address);
                self.calls += 1;
                self.max_depth = self.max_depth.max(self.stack.depth());
            }
            RecordKind::Return => self.stack.pop_matching(record.address, self.records)?,
            // Memory accesses and unknown kinds have no structural effect
            _ => {}
        }
        self.records += 1;
        Ok(())
    }

    /// End the pass
    ///
    /// # Errors
    /// * `TraceError::UnterminatedCalls` - calls still pending
    pub fn finish(self) -> Result<ValidationSummary, TraceError> {
        if !self.stack.is_empty() {
            return Err(TraceError::UnterminatedCalls {
                processed: self.records,
                pending: self.stack.pending(),
            });
        }

        Ok(ValidationSummary {
            records: self.records,
            calls: self.calls,
            max_depth: self.max_depth,
        })
    }

    /// Validate every record of a reader
    pub fn validate<R: Read>(
        mut self,
        mut reader: RecordReader<R>,
    ) -> Result<ValidationSummary, TraceError> {
        let mut batch = Vec::new();
        while reader.read_batch(&mut batch)? > 0 {
            for record in &batch {
                self.observe(record)?;
            }
        }
        self.finish()
    }
}

/// Validate a trace file
pub fn validate_trace(
    path: impl AsRef<Path>,
    chunk_capacity: usize,
) -> Result<ValidationSummary, TraceError> {
    let path = path.as_ref();
    debug!("Validating trace: {}", path.display());

    let reader = RecordReader::open(path, chunk_capacity)?;
    let result = Validator::new().validate(reader);

    match &result {
        Ok(summary) => info!("Number of processed trace entries: {}", summary.records),
        Err(e) => {
            if let Some(processed) = e.processed() {
                info!("Number of processed trace entries: {}", processed);
            }
        }
    }

    result
}

/// Validate an in-memory record sequence
pub fn validate_records(records: &[TraceRecord]) -> Result<ValidationSummary, TraceError> {
    let mut validator = Validator::new();
    for record in records {
        validator.observe(record)?;
    }
    validator.finish()
}
