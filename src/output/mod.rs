//! Output writers for traces and reports.
//!
//! This module handles writing data to disk in various formats:
//! - Binary trace files (same record format as the input)
//! - Text dumps of records
//! - JSON frequency reports

pub mod json;
pub mod text;
pub mod trace;

// Re-export main functions
pub use json::{read_report, write_report};
pub use text::{format_record, write_text_dump};
pub use trace::{write_trace, TraceWriter};

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
