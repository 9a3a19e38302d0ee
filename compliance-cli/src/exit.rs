//! Exit codes for the compliance-check CLI.
//!
//! Following Unix conventions for exit codes.

use compliance_conformance::{LoadError, RunError};

use crate::commands::CommandError;

/// Exit code constants.
pub mod codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Invalid arguments.
    pub const INVALID_ARGS: i32 = 1;
    /// IO error.
    pub const IO_ERROR: i32 = 2;
    /// Compliance report could not be decoded.
    pub const REPORT_ERROR: i32 = 3;
    /// Exception spec or expectations could not be decoded.
    pub const EXCEPTION_ERROR: i32 = 4;
    /// Requested profile is not in the report.
    pub const PROFILE_MISSING: i32 = 5;
    /// Findings remained after exceptions were discounted.
    pub const CHECK_FAILED: i32 = 8;
}

/// Map a CommandError to an exit code.
pub fn exit_code(error: &CommandError) -> i32 {
    match error {
        CommandError::InvalidArgument(_) => codes::INVALID_ARGS,
        CommandError::Filesystem(_) => codes::IO_ERROR,
        CommandError::Report(_) => codes::REPORT_ERROR,
        CommandError::Exceptions(_) => codes::EXCEPTION_ERROR,
        CommandError::Load(e) | CommandError::Run(RunError::Load(e)) => load_exit_code(e),
        CommandError::ProfileMissing(_) => codes::PROFILE_MISSING,
        CommandError::CheckFailed { .. } => codes::CHECK_FAILED,
    }
}

fn load_exit_code(error: &LoadError) -> i32 {
    match error {
        LoadError::NotFound(_) | LoadError::MissingFile(_) | LoadError::ReadError { .. } => {
            codes::IO_ERROR
        }
        LoadError::Report { .. } => codes::REPORT_ERROR,
        LoadError::JsonError { .. } | LoadError::Exceptions { .. } => codes::EXCEPTION_ERROR,
    }
}
