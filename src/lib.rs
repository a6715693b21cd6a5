//! Memtrace Analysis
//!
//! Analysis of binary memory traces: fixed-size records describing memory
//! reads, writes, function calls and returns, captured from an instrumented
//! program.
//!
//! This crate provides the core implementation for the `memtrace` CLI:
//! - `record`: the 16-byte record format
//! - `reader`: sequential and chunk-aligned readers
//! - `analysis`: call/return validation and span extraction
//! - `aggregator`: parallel read-address frequency counting
//!
//! ## Getting Started
//!
//! ```bash
//! memtrace validate trace.bin
//! memtrace extract trace.bin span.bin
//! memtrace uniq --workers 8 trace.bin
//! ```

pub mod aggregator;
pub mod analysis;
pub mod commands;
pub mod output;
pub mod reader;
pub mod record;
pub mod utils;
