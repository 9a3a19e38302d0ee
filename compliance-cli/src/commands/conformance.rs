//! Conformance command orchestration.

use std::path::PathBuf;

use compliance_conformance::{fixtures_dir, run_all_fixtures_in, run_fixture_in, ConformanceResult};

use crate::cli::ConformanceArgs;
use crate::logger::Logger;

use super::check::log_outcome;
use super::{CommandError, CommandResult};

/// Summary of a passing conformance run.
#[derive(Debug)]
pub struct ConformanceSummary {
    pub root: PathBuf,
    pub results: Vec<ConformanceResult>,
}

/// Execute the conformance command.
pub fn execute_conformance<L: Logger>(args: &ConformanceArgs, logger: &L) -> CommandResult<ConformanceSummary> {
    let root = args.fixtures.clone().unwrap_or_else(fixtures_dir);
    logger.verbose(&format!("fixtures root: {}", root.display()));

    let results = match &args.name {
        Some(name) => vec![run_fixture_in(&root, name)?],
        None => run_all_fixtures_in(&root)?,
    };

    for result in &results {
        let status = if result.passed { "PASS" } else { "FAIL" };
        logger.info(&format!("{} fixture {}", status, result.fixture_name));
        for outcome in &result.check.outcomes {
            if outcome.passed() {
                logger.verbose(&format!("  PASS {}", outcome.profile));
            } else {
                log_outcome(logger, outcome);
            }
        }
    }

    let failed = results.iter().filter(|r| !r.passed).count();
    if failed > 0 {
        return Err(CommandError::CheckFailed {
            what: "fixtures",
            failed,
            total: results.len(),
        });
    }

    Ok(ConformanceSummary { root, results })
}
