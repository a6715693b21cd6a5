//! Validate command implementation.
//!
//! Checks that every return in a trace matches the most recent pending call
//! and that no call is left open.

use super::models::ValidateArgs;
use super::utils::check_input_path;
use crate::analysis::validate_trace;
use anyhow::Result;
use colored::*;
use log::info;

/// Check validate command arguments before running
pub fn validate_trace_args(args: &ValidateArgs) -> Result<()> {
    check_input_path(&args.trace)?;
    args.config.validate()?;
    Ok(())
}

/// Execute the validate command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * First structural violation (with record index and addresses)
/// * Trace length or I/O failures
pub fn execute_validate(args: ValidateArgs) -> Result<()> {
    info!("Validating trace: {}", args.trace.display());

    let summary = validate_trace(&args.trace, args.config.chunk_capacity).map_err(|e| {
        let context = if e.is_structural() {
            format!("Trace {} is not well formed", args.trace.display())
        } else {
            format!("Failed to read trace {}", args.trace.display())
        };
        anyhow::Error::new(e).context(context)
    })?;

    println!("{} {}", "✓".green(), "Well-formed trace".bold());
    println!("  Records:   {}", summary.records);
    println!("  Calls:     {}", summary.calls);
    println!("  Max depth: {}", summary.max_depth);

    Ok(())
}
