//! Single-pass structural analysis of traces.
//!
//! This module handles:
//! - Tracking pending calls
//! - Validating call/return nesting
//! - Extracting the memory accesses of one invocation

pub mod call_stack;
pub mod extractor;
pub mod validator;

// Re-export main types
pub use call_stack::CallStack;
pub use extractor::{extract_records, extract_span, ExtractionSummary, Extractor};
pub use validator::{validate_records, validate_trace, ValidationSummary, Validator};
