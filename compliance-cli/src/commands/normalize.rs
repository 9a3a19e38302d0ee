//! Normalize command orchestration.
//!
//! Loads a report and an exception spec, discounts the exceptions from one
//! profile, and renders the result.

use std::path::{Path, PathBuf};

use compliance_fs::{Filesystem, NormalizedReportWriter};
use compliance_normalizer::{normalize, ExceptionSpec};
use compliance_schema::{ComplianceReport, ProfileReport, Section};

use crate::cli::{NormalizeArgs, SectionSelection};
use crate::logger::Logger;

use super::{CommandError, CommandResult};

/// Where the normalized report went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeOutput {
    /// Pretty JSON for the caller to print.
    Stdout(String),
    /// Written to this file.
    File(PathBuf),
}

/// Result of normalize command execution.
#[derive(Debug)]
pub struct NormalizeResult {
    pub profile: String,
    /// Sections that were present and normalized, in processing order.
    pub sections: Vec<Section>,
    pub report: ProfileReport,
    pub output: NormalizeOutput,
}

/// Execute the normalize command.
pub fn execute_normalize<F, L>(args: &NormalizeArgs, fs: &F, logger: &L) -> CommandResult<NormalizeResult>
where
    F: Filesystem + Clone,
    L: Logger,
{
    let selection = args.validate()?;

    let report = load_report(fs, &args.report, logger)?;
    let exceptions = load_exceptions(fs, args.exceptions.as_deref(), logger)?;

    let profile = report
        .profile(&args.profile)
        .ok_or_else(|| CommandError::ProfileMissing(args.profile.clone()))?;

    let targets: Vec<Section> = match selection {
        SectionSelection::One(section) => vec![section],
        SectionSelection::All => Section::ALL.to_vec(),
    };

    let mut normalized = profile.clone();
    let mut sections = Vec::new();
    for section in targets {
        let Some(before) = normalized.section_len(section) else {
            logger.verbose(&format!("{}: section '{}' absent, skipped", args.profile, section));
            continue;
        };

        normalized = normalize(&normalized, section, &exceptions);
        let after = normalized.section_len(section).unwrap_or(0);
        logger.verbose(&format!(
            "{}: '{}' {} -> {} entries",
            args.profile, section, before, after
        ));
        for item in normalized.residue(section) {
            logger.debug(&format!("  remaining: {}", item));
        }
        sections.push(section);
    }

    let output = match &args.out_dir {
        Some(dir) => {
            let writer = NormalizedReportWriter::new(fs.clone(), dir.clone());
            let path = writer.write(&args.profile, &normalized)?;
            logger.verbose(&format!("wrote {}", path.display()));
            NormalizeOutput::File(path)
        }
        None => NormalizeOutput::Stdout(normalized.to_json_pretty()?),
    };

    Ok(NormalizeResult {
        profile: args.profile.clone(),
        sections,
        report: normalized,
        output,
    })
}

/// Read and decode a compliance report through the filesystem.
pub(crate) fn load_report<F: Filesystem, L: Logger>(
    fs: &F,
    path: &Path,
    logger: &L,
) -> CommandResult<ComplianceReport> {
    let content = fs.read_file(path)?;
    let report = ComplianceReport::from_json(&content)?;
    logger.verbose(&format!(
        "loaded {} ({} profiles)",
        path.display(),
        report.compliance_profiles.len()
    ));
    Ok(report)
}

/// Read an exception spec, or an empty one when no file was given.
fn load_exceptions<F: Filesystem, L: Logger>(
    fs: &F,
    path: Option<&Path>,
    logger: &L,
) -> CommandResult<ExceptionSpec> {
    let Some(path) = path else {
        logger.debug("no exceptions file, nothing is excused");
        return Ok(ExceptionSpec::empty());
    };

    let content = fs.read_file(path)?;
    let spec = ExceptionSpec::from_json(&content)?;
    logger.verbose(&format!("loaded exceptions from {}", path.display()));
    Ok(spec)
}
