//! Conformance runner: normalizes reports and checks them against
//! expectations.

use std::path::Path;

use compliance_normalizer::normalize;
use compliance_schema::ComplianceReport;

use crate::loader::{fixtures_dir, list_fixtures_in, load_fixture_from, LoadError};
use crate::types::{
    CheckReport, ConformanceResult, Expectations, Fixture, ProfileExpectation, ProfileFailure,
    ProfileOutcome, SectionResidue,
};

/// Errors that can occur during conformance runs.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("failed to load fixture: {0}")]
    Load(#[from] LoadError),
}

/// Check one profile of `report` against its expectation.
///
/// Each validated section is normalized independently from the original
/// report. Sections absent from the report pass without being checked.
pub fn check_profile(
    report: &ComplianceReport,
    profile: &str,
    expectation: &ProfileExpectation,
) -> ProfileOutcome {
    let mut outcome = ProfileOutcome {
        profile: profile.to_string(),
        sections_checked: Vec::new(),
        failures: Vec::new(),
    };

    let Some(profile_report) = report.profile(profile) else {
        outcome.failures.push(ProfileFailure::MissingProfile);
        return outcome;
    };

    if let Some(expected) = expectation.percent_compliant {
        let actual = profile_report.summary.percent_compliant;
        if (expected - actual).abs() > f64::EPSILON {
            outcome
                .failures
                .push(ProfileFailure::PercentMismatch { expected, actual });
        }
    }

    for &section in &expectation.sections {
        if !profile_report.has_section(section) {
            continue;
        }
        outcome.sections_checked.push(section);

        let normalized = normalize(profile_report, section, &expectation.exceptions);
        if !normalized.section_is_empty(section) {
            outcome.failures.push(ProfileFailure::Residue(SectionResidue {
                section,
                remaining: normalized.residue(section),
            }));
        }
    }

    outcome
}

/// Check every expected profile, in profile name order.
pub fn check_report(report: &ComplianceReport, expectations: &Expectations) -> CheckReport {
    CheckReport {
        outcomes: expectations
            .profiles
            .iter()
            .map(|(profile, expectation)| check_profile(report, profile, expectation))
            .collect(),
    }
}

/// Run a single fixture from the default fixtures directory.
pub fn run_fixture(name: &str) -> Result<ConformanceResult, RunError> {
    run_fixture_in(&fixtures_dir(), name)
}

/// Run a single fixture from `root`.
pub fn run_fixture_in(root: &Path, name: &str) -> Result<ConformanceResult, RunError> {
    let fixture = load_fixture_from(root, name)?;
    Ok(run_fixture_check(&fixture))
}

/// Run fixture check with loaded fixture data.
pub fn run_fixture_check(fixture: &Fixture) -> ConformanceResult {
    let check = check_report(&fixture.report, &fixture.expectations);
    ConformanceResult::from_check(&fixture.meta.name, check)
}

/// Run every fixture under `root`, in name order.
pub fn run_all_fixtures_in(root: &Path) -> Result<Vec<ConformanceResult>, RunError> {
    list_fixtures_in(root)?
        .iter()
        .map(|name| run_fixture_in(root, name))
        .collect()
}
