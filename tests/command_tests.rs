use memtrace_analysis::commands::{
    validate_dump_args, validate_extract_args, validate_trace_args, validate_uniq_args, DumpArgs,
    ExtractArgs, UniqArgs, ValidateArgs,
};
use memtrace_analysis::analysis::validate_trace;
use memtrace_analysis::output::write_trace;
use memtrace_analysis::record::TraceRecord;
use memtrace_analysis::utils::config::{AnalysisConfig, MAX_CHUNK_CAPACITY, MAX_WORKERS};
use memtrace_analysis::utils::error::TraceError;
use std::path::PathBuf;

#[test]
fn test_validate_args_valid() {
    let args = ValidateArgs {
        trace: PathBuf::from("trace.bin"),
        ..Default::default()
    };

    assert!(validate_trace_args(&args).is_ok());
}

#[test]
fn test_validate_args_empty_path() {
    let args = ValidateArgs::default();
    assert!(validate_trace_args(&args).is_err());
}

#[test]
fn test_validate_args_directory() {
    let dir = tempfile::tempdir().unwrap();
    let args = ValidateArgs {
        trace: dir.path().to_path_buf(),
        ..Default::default()
    };

    assert!(validate_trace_args(&args).is_err());
}

#[test]
fn test_extract_args_same_file() {
    let args = ExtractArgs {
        input: PathBuf::from("trace.bin"),
        output: PathBuf::from("trace.bin"),
        ..Default::default()
    };

    assert!(validate_extract_args(&args).is_err());
}

#[test]
fn test_extract_args_valid() {
    let args = ExtractArgs {
        input: PathBuf::from("trace.bin"),
        output: PathBuf::from("span.bin"),
        ..Default::default()
    };

    assert!(validate_extract_args(&args).is_ok());
}

#[test]
fn test_extract_args_output_is_directory() {
    let dir = tempfile::tempdir().unwrap();
    let args = ExtractArgs {
        input: PathBuf::from("trace.bin"),
        output: dir.path().to_path_buf(),
        ..Default::default()
    };

    assert!(validate_extract_args(&args).is_err());
}

#[test]
fn test_uniq_args_zero_workers() {
    let args = UniqArgs {
        trace: PathBuf::from("trace.bin"),
        config: AnalysisConfig {
            workers: Some(0),
            ..Default::default()
        },
        ..Default::default()
    };

    assert!(validate_uniq_args(&args).is_err());
}

#[test]
fn test_uniq_args_too_many_workers() {
    let args = UniqArgs {
        trace: PathBuf::from("trace.bin"),
        config: AnalysisConfig {
            workers: Some(MAX_WORKERS + 1),
            ..Default::default()
        },
        ..Default::default()
    };

    assert!(validate_uniq_args(&args).is_err());
}

#[test]
fn test_dump_args_zero_chunk_capacity() {
    let args = DumpArgs {
        trace: PathBuf::from("trace.bin"),
        config: AnalysisConfig {
            chunk_capacity: 0,
            workers: None,
        },
        ..Default::default()
    };

    assert!(validate_dump_args(&args).is_err());
}

#[test]
fn test_dump_args_huge_chunk_capacity() {
    let args = DumpArgs {
        trace: PathBuf::from("trace.bin"),
        config: AnalysisConfig {
            chunk_capacity: usize::MAX / 16 + 1,
            workers: None,
        },
        ..Default::default()
    };

    assert!(validate_dump_args(&args).is_err());
}

#[test]
fn test_validate_args_chunk_capacity_above_max() {
    let args = ValidateArgs {
        trace: PathBuf::from("trace.bin"),
        config: AnalysisConfig {
            chunk_capacity: MAX_CHUNK_CAPACITY + 1,
            workers: None,
        },
    };

    assert!(validate_trace_args(&args).is_err());
}

#[test]
fn test_huge_chunk_capacity_is_an_error_not_an_empty_trace() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.bin");
    write_trace(&path, &[TraceRecord::call(5), TraceRecord::ret(5)]).unwrap();

    assert!(matches!(
        validate_trace(&path, usize::MAX / 16 + 1),
        Err(TraceError::InvalidChunkCapacity { .. })
    ));
}
