//! Pending-call stack shared by the validator and extractor.

use crate::utils::error::TraceError;
use log::trace;

/// LIFO of unmatched call addresses for one pass over one trace
#[derive(Debug, Default, Clone)]
pub struct CallStack {
    pending: Vec<i64>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, address: i64) {
        trace!("Call to {:#x}", address);
        self.pending.push(address);
    }

    /// Match a return against the most recent pending call
    ///
    /// `index` is the position of the return record, used for diagnostics.
    ///
    /// # Errors
    /// * `TraceError::UnmatchedReturn` - no call is pending
    /// * `TraceError::MismatchedReturn` - the pending call has another address
    pub fn pop_matching(&mut self, address: i64, index: u64) -> Result<(), TraceError> {
        match self.pending.last() {
            None => Err(TraceError::UnmatchedReturn { index, address }),
            Some(&expected) if expected != address => Err(TraceError::MismatchedReturn {
                index,
                expected,
                found: address,
            }),
            Some(_) => {
                self.pending.pop();
                trace!("Return from {:#x}", address);
                Ok(())
            }
        }
    }

    pub fn depth(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending addresses, most recent first
    pub fn pending(&self) -> Vec<i64> {
        self.pending.iter().rev().copied().collect()
    }
}
