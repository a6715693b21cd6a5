//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading or analyzing a trace
///
/// Decoding a record never fails, so there is no decode variant: every
/// 16-byte pattern is a valid record (unknown kinds included).
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("no call for return ({address:#x}) at record {index}")]
    UnmatchedReturn { index: u64, address: i64 },

    #[error("call ({expected:#x}) and return ({found:#x}) do not match at record {index}")]
    MismatchedReturn {
        index: u64,
        expected: i64,
        found: i64,
    },

    #[error("missing return for {} call(s): {}", .pending.len(), format_addresses(.pending))]
    UnterminatedCalls { processed: u64, pending: Vec<i64> },

    #[error("no terminating return found after {processed} records (open calls: {depth})")]
    NoTerminatingReturn { processed: u64, depth: usize },

    #[error("trace length {len} is not a multiple of the record size ({record_size} bytes)")]
    CorruptTraceLength { len: u64, record_size: usize },

    #[error("chunk capacity {capacity} is out of range (1..={max} records)")]
    InvalidChunkCapacity { capacity: usize, max: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TraceError {
    /// Short label for the kind of failure
    pub fn kind(&self) -> &'static str {
        match self {
            TraceError::UnmatchedReturn { .. } => "UnmatchedReturn",
            TraceError::MismatchedReturn { .. } => "MismatchedReturn",
            TraceError::UnterminatedCalls { .. } => "UnterminatedCalls",
            TraceError::NoTerminatingReturn { .. } => "NoTerminatingReturn",
            TraceError::CorruptTraceLength { .. } => "CorruptTraceLength",
            TraceError::InvalidChunkCapacity { .. } => "InvalidChunkCapacity",
            TraceError::Io(_) => "IoFailure",
        }
    }

    /// Number of records successfully processed before the failure, if known
    pub fn processed(&self) -> Option<u64> {
        match self {
            TraceError::UnmatchedReturn { index, .. }
            | TraceError::MismatchedReturn { index, .. } => Some(*index),
            TraceError::UnterminatedCalls { processed, .. }
            | TraceError::NoTerminatingReturn { processed, .. } => Some(*processed),
            TraceError::CorruptTraceLength { .. }
            | TraceError::InvalidChunkCapacity { .. }
            | TraceError::Io(_) => None,
        }
    }

    /// Whether this is a call/return structure violation (as opposed to storage trouble)
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            TraceError::UnmatchedReturn { .. }
                | TraceError::MismatchedReturn { .. }
                | TraceError::UnterminatedCalls { .. }
                | TraceError::NoTerminatingReturn { .. }
        )
    }
}

fn format_addresses(addresses: &[i64]) -> String {
    addresses
        .iter()
        .map(|a| format!("{:#x}", a))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading analysis configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unterminated_lists_addresses() {
        let err = TraceError::UnterminatedCalls {
            processed: 3,
            pending: vec![0x20, 0x10],
        };
        assert_eq!(err.to_string(), "missing return for 2 call(s): 0x20 0x10");
        assert_eq!(err.processed(), Some(3));
        assert!(err.is_structural());
    }

    #[test]
    fn test_io_error_kind() {
        let err = TraceError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.kind(), "IoFailure");
        assert_eq!(err.processed(), None);
        assert!(!err.is_structural());
    }
}
