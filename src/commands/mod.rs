//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod dump;
pub mod extract;
pub mod models;
pub mod uniq;
pub mod utils;
pub mod validate;

// Re-export main command functions
pub use dump::{execute_dump, validate_dump_args};
pub use extract::{execute_extract, validate_extract_args};
pub use models::{DumpArgs, ExtractArgs, UniqArgs, ValidateArgs};
pub use uniq::{execute_uniq, validate_uniq_args};
pub use utils::{display_format, display_version};
pub use validate::{execute_validate, validate_trace_args};
