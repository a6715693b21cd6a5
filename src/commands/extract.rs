//! Extract command implementation.
//!
//! Copies the memory accesses of the first non-leading invocation into a
//! new trace file.

use super::models::ExtractArgs;
use super::utils::check_input_path;
use crate::analysis::extract_span;
use crate::output::validate_path;
use anyhow::{bail, Context, Result};
use colored::*;
use log::info;
use std::time::Instant;

/// Check extract command arguments before running
pub fn validate_extract_args(args: &ExtractArgs) -> Result<()> {
    check_input_path(&args.input)?;
    validate_path(&args.output)?;

    if args.input == args.output {
        bail!(
            "Input and output must be different files: {}",
            args.input.display()
        );
    }

    args.config.validate()?;
    Ok(())
}

/// Execute the extract command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Structural violations before the span closes
/// * No terminating return for the bounding call
/// * I/O failures on either file
pub fn execute_extract(args: ExtractArgs) -> Result<()> {
    let start_time = Instant::now();
    info!(
        "Extracting span from {} into {}",
        args.input.display(),
        args.output.display()
    );

    let summary = extract_span(&args.input, &args.output, args.config.chunk_capacity)
        .with_context(|| format!("Extraction from {} failed", args.input.display()))?;

    println!("{} {}", "✓".green(), "Extraction success.".bold());
    println!(
        "  Call:      {:#x} (records {}..={})",
        summary.call_address, summary.start_index, summary.end_index
    );
    println!("  Extracted: {} records", summary.records_extracted);
    println!("  Output:    {}", args.output.display().to_string().cyan());

    info!(
        "Extraction completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
