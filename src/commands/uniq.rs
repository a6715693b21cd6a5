//! Uniq command implementation.
//!
//! The uniq command:
//! 1. Splits the trace into chunks and counts read addresses on a worker pool
//! 2. Merges the worker maps
//! 3. Prints the frequency table
//! 4. Optionally writes a JSON report

use super::models::UniqArgs;
use super::utils::check_input_path;
use crate::aggregator::{aggregate_reads, format_frequency_table, FrequencyReport};
use crate::output::{validate_path, write_report};
use anyhow::{Context, Result};
use colored::*;
use log::info;
use std::time::Instant;

/// Check uniq command arguments before running
pub fn validate_uniq_args(args: &UniqArgs) -> Result<()> {
    check_input_path(&args.trace)?;
    if let Some(path) = &args.output_json {
        validate_path(path)?;
    }
    args.config.validate()?;
    Ok(())
}

/// Execute the uniq command
///
/// **Public** - main entry point called from main.rs
pub fn execute_uniq(args: UniqArgs) -> Result<()> {
    let start_time = Instant::now();
    info!("Aggregating read addresses in {}", args.trace.display());

    let result = aggregate_reads(&args.trace, &args.config)
        .with_context(|| format!("Failed to aggregate {}", args.trace.display()))?;

    if args.print_table {
        print!("{}", format_frequency_table(&result));
    }

    if let Some(path) = &args.output_json {
        let report = FrequencyReport::from_result(args.trace.display().to_string(), &result);
        write_report(&report, path).context("Failed to write frequency report")?;
        eprintln!(
            "📊 Frequency report written to {}",
            path.display().to_string().cyan()
        );
    }

    info!(
        "{} distinct read addresses over {} records ({} chunks, {} workers) in {:.2}s",
        result.frequencies.len(),
        result.records_processed,
        result.chunks,
        result.workers,
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
