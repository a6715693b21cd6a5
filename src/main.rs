//! Memtrace Analysis CLI
//!
//! Structural validation, span extraction and read-frequency aggregation
//! for binary memory traces.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use memtrace_analysis::commands::{
    display_format, display_version, execute_dump, execute_extract, execute_uniq,
    execute_validate, validate_dump_args, validate_extract_args, validate_trace_args,
    validate_uniq_args, DumpArgs, ExtractArgs, UniqArgs, ValidateArgs,
};
use memtrace_analysis::utils::config::{load_config, AnalysisConfig};

/// Memtrace Analysis - tools for binary memory traces
#[derive(Parser, Debug)]
#[command(name = "memtrace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML file with analysis settings
    #[arg(long, global = true, env = "MEMTRACE_CONFIG")]
    config: Option<PathBuf>,

    /// Records per read batch / aggregation chunk
    #[arg(long, global = true)]
    chunk_capacity: Option<usize>,

    /// Number of aggregation workers (defaults to available parallelism)
    #[arg(long, global = true)]
    workers: Option<usize>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check call/return nesting of a trace
    Validate {
        /// Trace file
        trace: PathBuf,
    },

    /// Copy the memory accesses of the first non-leading call into a new trace
    Extract {
        /// Input trace file
        input: PathBuf,

        /// Output trace file
        output: PathBuf,
    },

    /// Count repeated read addresses in parallel
    Uniq {
        /// Trace file
        trace: PathBuf,

        /// Also write a JSON report
        #[arg(long)]
        json: Option<PathBuf>,

        /// Do not print the frequency table
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print records as text
    Dump {
        /// Trace file
        trace: PathBuf,

        /// Maximum number of records to print
        #[arg(short = 'n', long)]
        limit: Option<u64>,
    },

    /// Display record format information
    Format {
        /// Show full layout details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let config = resolve_config(&cli)?;

    // Execute command
    match cli.command {
        Commands::Validate { trace } => {
            let args = ValidateArgs { trace, config };
            validate_trace_args(&args)?;
            execute_validate(args)?;
        }

        Commands::Extract { input, output } => {
            let args = ExtractArgs {
                input,
                output,
                config,
            };
            validate_extract_args(&args)?;
            execute_extract(args)?;
        }

        Commands::Uniq { trace, json, quiet } => {
            let args = UniqArgs {
                trace,
                output_json: json,
                print_table: !quiet,
                config,
            };
            validate_uniq_args(&args)?;
            execute_uniq(args)?;
        }

        Commands::Dump { trace, limit } => {
            let args = DumpArgs {
                trace,
                limit,
                config,
            };
            validate_dump_args(&args)?;
            execute_dump(args)?;
        }

        Commands::Format { show } => {
            display_format(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Config file first, then command-line overrides
fn resolve_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    if let Some(capacity) = cli.chunk_capacity {
        config.chunk_capacity = capacity;
    }
    if let Some(workers) = cli.workers {
        config.workers = Some(workers);
    }

    Ok(config)
}
