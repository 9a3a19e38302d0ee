//! Check command orchestration.
//!
//! Checks every profile named in an expectations file against a report and
//! fails if any of them still has unexpected findings.

use compliance_conformance::{check_report, parse_expectations, parse_report, CheckReport, ProfileOutcome};
use compliance_fs::Filesystem;

use crate::cli::CheckArgs;
use crate::logger::Logger;

use super::{CommandError, CommandResult};

/// Result of a passing check.
#[derive(Debug)]
pub struct CheckResult {
    pub check: CheckReport,
}

impl CheckResult {
    /// Number of profiles checked.
    pub fn profile_count(&self) -> usize {
        self.check.outcomes.len()
    }
}

/// Execute the check command.
///
/// Per-profile results are logged as they are produced. Any failing profile
/// turns into [`CommandError::CheckFailed`].
pub fn execute_check<F, L>(args: &CheckArgs, fs: &F, logger: &L) -> CommandResult<CheckResult>
where
    F: Filesystem,
    L: Logger,
{
    let report = parse_report(&fs.read_file(&args.report)?, &args.report)?;
    logger.verbose(&format!(
        "loaded {} ({} profiles)",
        args.report.display(),
        report.compliance_profiles.len()
    ));

    let expectations = parse_expectations(&fs.read_file(&args.expectations)?, &args.expectations)?;
    logger.verbose(&format!(
        "loaded {} ({} expected profiles)",
        args.expectations.display(),
        expectations.profiles.len()
    ));

    let check = check_report(&report, &expectations);
    for outcome in &check.outcomes {
        log_outcome(logger, outcome);
    }

    let failed = check.failed_profiles().len();
    if failed > 0 {
        return Err(CommandError::CheckFailed {
            what: "profiles",
            failed,
            total: check.outcomes.len(),
        });
    }

    Ok(CheckResult { check })
}

/// Log one profile's result: a PASS/FAIL line, then one line per failure.
pub(crate) fn log_outcome<L: Logger>(logger: &L, outcome: &ProfileOutcome) {
    if outcome.passed() {
        logger.info(&format!("PASS {}", outcome.profile));
    } else {
        logger.info(&format!("FAIL {}", outcome.profile));
        for failure in &outcome.failures {
            logger.info(&format!("  {}", failure));
        }
    }

    let checked: Vec<&str> = outcome.sections_checked.iter().map(|s| s.as_str()).collect();
    logger.debug(&format!("  sections checked: [{}]", checked.join(", ")));
}
