//! Parallel aggregation of read addresses.
//!
//! This module turns a trace file into:
//! - Per-worker address maps over disjoint chunk ranges
//! - One merged address -> repeat-count map
//! - A serializable frequency report

pub mod frequency;
pub mod parallel;
pub mod report;

// Re-export main types and functions
pub use frequency::{merge_maps, AddressFrequencyMap};
pub use parallel::{aggregate_reads, partition_chunks, AggregationResult};
pub use report::{format_frequency_table, FrequencyEntry, FrequencyReport};
