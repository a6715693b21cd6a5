use crate::record::{RecordKind, RECORD_SIZE};
use crate::utils::config::{DEFAULT_CHUNK_CAPACITY, REPORT_VERSION};
use anyhow::{bail, Result};
use std::path::Path;

/// Reject empty paths and directories given as trace inputs
pub fn check_input_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        bail!("Trace path cannot be empty");
    }

    if path.is_dir() {
        bail!("Trace path is a directory: {}", path.display());
    }

    Ok(())
}

/// Display trace record format information
pub fn display_format(show_details: bool) {
    println!("Memory Trace Record Format");
    println!("Record size: {} bytes", RECORD_SIZE);
    println!();

    if show_details {
        println!("Layout (little-endian, no header, no delimiters):");
        println!("  offset 0   addr: i64  - Accessed address or call/return target");
        println!("  offset 8   kind: u32  - Record kind code");
        println!("  offset 12  size: u32  - Access width in bytes (0 for call/return)");
        println!();
        println!("Kind codes:");
        for kind in [
            RecordKind::Read,
            RecordKind::Write,
            RecordKind::Call,
            RecordKind::Return,
        ] {
            println!("  {}  {}", kind.code(), kind);
        }
        println!("  other values are kept as Unknown and ignored by the analyses");
        println!();
        println!("Default chunk capacity: {} records", DEFAULT_CHUNK_CAPACITY);
    } else {
        println!("Use --show for detailed format information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Memtrace Analysis v{}", env!("CARGO_PKG_VERSION"));
    println!("Record size: {} bytes", RECORD_SIZE);
    println!("Report Schema: v{}", REPORT_VERSION);
    println!();
    println!("Validation, span extraction and read-frequency analysis for memory traces.");
}
