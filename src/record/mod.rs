//! Trace record definition and wire codec.
//!
//! A trace file is a plain concatenation of fixed-size records with no
//! header, footer or delimiters.

pub mod codec;

// Re-export main types
pub use codec::{decode_into, encode_all, RecordKind, TraceRecord, RECORD_SIZE};
