//! JSON schema for aggregation output.
//!
//! Schema is versioned to allow future evolution.

use super::parallel::AggregationResult;
use crate::record::RECORD_SIZE;
use crate::utils::config::REPORT_VERSION;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Top-level report written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace file that was analyzed
    pub trace: String,

    pub record_size: usize,
    pub total_records: u64,
    pub records_processed: u64,
    pub chunks: usize,
    pub workers: usize,
    pub distinct_addresses: usize,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Ascending by address
    pub entries: Vec<FrequencyEntry>,
}

/// One read address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub address: i64,

    /// Sightings beyond the first
    pub repeats: u64,
}

impl FrequencyReport {
    pub fn from_result(trace: impl Into<String>, result: &AggregationResult) -> Self {
        let entries: Vec<FrequencyEntry> = result
            .frequencies
            .iter()
            .map(|(&address, &repeats)| FrequencyEntry { address, repeats })
            .collect();

        Self {
            version: REPORT_VERSION.to_string(),
            trace: trace.into(),
            record_size: RECORD_SIZE,
            total_records: result.total_records,
            records_processed: result.records_processed,
            chunks: result.chunks,
            workers: result.workers,
            distinct_addresses: entries.len(),
            generated_at: Utc::now().to_rfc3339(),
            entries,
        }
    }
}

/// Render the frequency table, one `<0xaddr> <repeats>` line per address
pub fn format_frequency_table(result: &AggregationResult) -> String {
    let mut table = String::new();
    for (address, repeats) in result.frequencies.iter() {
        // Writing to a String cannot fail
        let _ = writeln!(table, "{:#x} {}", address, repeats);
    }
    table
}
