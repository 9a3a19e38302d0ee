//! compliance-check CLI.
//!
//! Argument parsing, command orchestration, logging, and exit codes for the
//! `compliance-check` binary. Commands are generic over the filesystem and
//! logger so they can be driven entirely in memory by tests.

pub mod cli;
pub mod commands;
pub mod exit;
pub mod logger;

pub use cli::{
    parse_from, CheckArgs, Cli, CliError, Command, ConformanceArgs, NormalizeArgs,
    SectionSelection, DEFAULT_REPORT_PATH,
};
pub use commands::{
    execute_check, execute_conformance, execute_normalize, CheckResult, CommandError,
    CommandResult, ConformanceSummary, NormalizeOutput, NormalizeResult,
};
pub use logger::{Logger, MockLogger, NullLogger, StderrLogger, Verbosity};
