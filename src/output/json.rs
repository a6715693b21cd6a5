//! JSON report writer.
//!
//! Writes FrequencyReport structs to JSON files with proper formatting.

use super::validate_path;
use crate::aggregator::FrequencyReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(
    report: &FrequencyReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    debug!("Report written: {} entries", report.entries.len());
    Ok(())
}

/// Read a report back from a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<FrequencyReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let report: FrequencyReport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(report)
}
