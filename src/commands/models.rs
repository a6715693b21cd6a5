use crate::utils::config::AnalysisConfig;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Trace file to check
    pub trace: PathBuf,

    pub config: AnalysisConfig,
}

/// Arguments for the extract command
#[derive(Debug, Clone, Default)]
pub struct ExtractArgs {
    /// Source trace
    pub input: PathBuf,

    /// Destination trace (written only on success)
    pub output: PathBuf,

    pub config: AnalysisConfig,
}

/// Arguments for the uniq command
#[derive(Debug, Clone, Default)]
pub struct UniqArgs {
    /// Trace file to aggregate
    pub trace: PathBuf,

    /// Optional JSON report destination
    pub output_json: Option<PathBuf>,

    /// Print the frequency table to stdout
    pub print_table: bool,

    pub config: AnalysisConfig,
}

/// Arguments for the dump command
#[derive(Debug, Clone, Default)]
pub struct DumpArgs {
    pub trace: PathBuf,

    /// Stop after this many records
    pub limit: Option<u64>,

    pub config: AnalysisConfig,
}
