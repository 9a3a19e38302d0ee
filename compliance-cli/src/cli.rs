//! CLI argument parsing for compliance-check.
//!
//! Provides the command-line interface with normalize, check, and
//! conformance subcommands.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use compliance_schema::Section;
use thiserror::Error;

/// Default report path written by the system under test.
pub const DEFAULT_REPORT_PATH: &str = "compliance_report.json";

/// Errors from CLI argument validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("one of --section or --all-sections is required")]
    MissingSection,

    #[error("--section and --all-sections are mutually exclusive")]
    ConflictingSection,

    #[error("unknown section '{0}' (expected non_compliant, documented_missing_parameters or documented_missing_resources)")]
    UnknownSection(String),

    #[error("profile name must not be empty")]
    EmptyProfile,
}

/// Compliance report checker - discounts known exceptions and asserts the
/// remaining findings are empty.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "compliance-check")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for progress, -vv for debug).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print a profile report with its exceptions discounted.
    Normalize(NormalizeArgs),
    /// Check a report against per-profile expectations.
    Check(CheckArgs),
    /// Run conformance fixtures.
    Conformance(ConformanceArgs),
}

/// Arguments for the normalize command.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct NormalizeArgs {
    /// Compliance report JSON file.
    #[arg(short, long, default_value = DEFAULT_REPORT_PATH)]
    pub report: PathBuf,

    /// Exception spec JSON file. Without it nothing is excused.
    #[arg(short, long)]
    pub exceptions: Option<PathBuf>,

    /// Compliance profile to normalize (e.g. disa_stig).
    #[arg(short, long)]
    pub profile: String,

    /// Section to normalize.
    #[arg(short, long)]
    pub section: Option<String>,

    /// Normalize every section.
    #[arg(long)]
    pub all_sections: bool,

    /// Write the normalized report into this directory instead of stdout.
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

/// Which sections a normalize run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionSelection {
    One(Section),
    All,
}

impl NormalizeArgs {
    /// Validate the arguments and resolve the section selection.
    pub fn validate(&self) -> Result<SectionSelection, CliError> {
        if self.profile.trim().is_empty() {
            return Err(CliError::EmptyProfile);
        }

        match (&self.section, self.all_sections) {
            (Some(_), true) => Err(CliError::ConflictingSection),
            (None, false) => Err(CliError::MissingSection),
            (None, true) => Ok(SectionSelection::All),
            (Some(name), false) => name
                .parse()
                .map(SectionSelection::One)
                .map_err(|_| CliError::UnknownSection(name.clone())),
        }
    }
}

/// Arguments for the check command.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct CheckArgs {
    /// Compliance report JSON file.
    #[arg(short, long, default_value = DEFAULT_REPORT_PATH)]
    pub report: PathBuf,

    /// Expectations JSON file (profile -> percent_compliant, exceptions, sections).
    #[arg(short, long)]
    pub expectations: PathBuf,
}

/// Arguments for the conformance command.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct ConformanceArgs {
    /// Fixtures directory. Defaults to $COMPLIANCE_FIXTURES_DIR or ./fixtures.
    #[arg(short, long)]
    pub fixtures: Option<PathBuf>,

    /// Run only this fixture.
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Parse CLI arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}
