//! Command orchestration for CLI subcommands.
//!
//! Provides execute functions for:
//! - `normalize` - Discount exceptions from one profile of a report
//! - `check` - Check a report against per-profile expectations
//! - `conformance` - Run fixtures

pub mod check;
pub mod conformance;
pub mod normalize;

pub use check::{execute_check, CheckResult};
pub use conformance::{execute_conformance, ConformanceSummary};
pub use normalize::{execute_normalize, NormalizeOutput, NormalizeResult};

use compliance_conformance::{LoadError, RunError};
use compliance_fs::FsError;
use compliance_normalizer::ExceptionError;
use compliance_schema::ReportError;
use thiserror::Error;

use crate::cli::CliError;

/// Errors from command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] CliError),

    #[error("filesystem error: {0}")]
    Filesystem(#[from] FsError),

    #[error("report error: {0}")]
    Report(#[from] ReportError),

    #[error("exception spec error: {0}")]
    Exceptions(#[from] ExceptionError),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Run(#[from] RunError),

    #[error("profile '{0}' not found in report")]
    ProfileMissing(String),

    #[error("{failed} of {total} checked {what} failed")]
    CheckFailed {
        what: &'static str,
        failed: usize,
        total: usize,
    },
}

/// Result of command execution.
pub type CommandResult<T> = Result<T, CommandError>;
