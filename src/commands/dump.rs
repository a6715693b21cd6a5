//! Dump command implementation.
//! Prints a binary trace in the one-line-per-record text form.

use super::models::DumpArgs;
use super::utils::check_input_path;
use crate::output::write_text_dump;
use crate::reader::RecordReader;
use anyhow::{Context, Result};
use log::debug;
use std::io::{self, Write};

/// Check dump command arguments before running
pub fn validate_dump_args(args: &DumpArgs) -> Result<()> {
    check_input_path(&args.trace)?;
    args.config.validate()?;
    Ok(())
}

/// Execute the dump command
pub fn execute_dump(args: DumpArgs) -> Result<()> {
    let mut reader = RecordReader::open(&args.trace, args.config.chunk_capacity)
        .with_context(|| format!("Failed to open {}", args.trace.display()))?;

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut remaining = args.limit.unwrap_or(u64::MAX);
    let mut batch = Vec::new();

    while remaining > 0 && reader.read_batch(&mut batch).context("Failed to read trace")? > 0 {
        let take = batch.len().min(usize::try_from(remaining).unwrap_or(usize::MAX));
        remaining -= write_text_dump(&mut out, &batch[..take])?;
    }
    out.flush()?;

    debug!("Dumped {} records", reader.records_read());
    Ok(())
}
