//! Conformance types.

use std::collections::BTreeMap;
use std::fmt;

use compliance_normalizer::ExceptionSpec;
use compliance_schema::{ComplianceReport, Section};
use serde::{Deserialize, Serialize};

/// Fixture scenario metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioMeta {
    pub name: String,
    pub description: String,
}

/// What a single profile's report must look like once exceptions are
/// discounted.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileExpectation {
    /// Expected `summary.percent_compliant`, when asserted.
    pub percent_compliant: Option<f64>,
    pub exceptions: ExceptionSpec,
    /// Sections that must normalize to empty.
    pub sections: Vec<Section>,
}

impl Default for ProfileExpectation {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileExpectation {
    /// Expect every section to be clean, with no exceptions and no summary
    /// assertion.
    pub fn new() -> Self {
        Self {
            percent_compliant: None,
            exceptions: ExceptionSpec::empty(),
            sections: Section::ALL.to_vec(),
        }
    }

    /// Builder: assert the summary percentage.
    pub fn with_percent_compliant(mut self, percent: f64) -> Self {
        self.percent_compliant = Some(percent);
        self
    }

    /// Builder: set the exception spec.
    pub fn with_exceptions(mut self, exceptions: ExceptionSpec) -> Self {
        self.exceptions = exceptions;
        self
    }

    /// Builder: restrict which sections are validated.
    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }
}

/// Expectations for every profile of a report, keyed by profile name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expectations {
    pub profiles: BTreeMap<String, ProfileExpectation>,
}

impl Expectations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a profile expectation.
    pub fn with_profile(mut self, name: impl Into<String>, expectation: ProfileExpectation) -> Self {
        self.profiles.insert(name.into(), expectation);
        self
    }
}

/// A loaded fixture ready for execution.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub meta: ScenarioMeta,
    pub report: ComplianceReport,
    pub expectations: Expectations,
}

/// Identifiers still present in a section after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionResidue {
    pub section: Section,
    pub remaining: Vec<String>,
}

/// Why a profile failed its checks.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileFailure {
    /// The report has no entry for the profile.
    MissingProfile,
    /// `summary.percent_compliant` differs from the expected value.
    PercentMismatch { expected: f64, actual: f64 },
    /// A validated section still has findings after exceptions.
    Residue(SectionResidue),
}

impl fmt::Display for ProfileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileFailure::MissingProfile => write!(f, "profile missing from report"),
            ProfileFailure::PercentMismatch { expected, actual } => write!(
                f,
                "percent_compliant is {}, expected {}",
                actual, expected
            ),
            ProfileFailure::Residue(residue) => write!(
                f,
                "'{}' has {} unexpected item(s): {}",
                residue.section,
                residue.remaining.len(),
                residue.remaining.join(", ")
            ),
        }
    }
}

/// Result of checking one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileOutcome {
    pub profile: String,
    /// Sections that were present in the report and normalized.
    pub sections_checked: Vec<Section>,
    pub failures: Vec<ProfileFailure>,
}

impl ProfileOutcome {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of checking every expected profile of a report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    pub outcomes: Vec<ProfileOutcome>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(ProfileOutcome::passed)
    }

    /// Names of profiles with at least one failure.
    pub fn failed_profiles(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.passed())
            .map(|outcome| outcome.profile.as_str())
            .collect()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().map(|outcome| outcome.failures.len()).sum()
    }
}

/// Result of a conformance check.
#[derive(Debug, Clone)]
pub struct ConformanceResult {
    pub fixture_name: String,
    pub passed: bool,
    pub check: CheckReport,
}

impl ConformanceResult {
    /// Create a passing result.
    pub fn pass(fixture_name: &str, check: CheckReport) -> Self {
        Self {
            fixture_name: fixture_name.to_string(),
            passed: true,
            check,
        }
    }

    /// Create a failing result.
    pub fn fail(fixture_name: &str, check: CheckReport) -> Self {
        Self {
            fixture_name: fixture_name.to_string(),
            passed: false,
            check,
        }
    }

    /// Build a result from a check, passing iff every profile passed.
    pub fn from_check(fixture_name: &str, check: CheckReport) -> Self {
        if check.passed() {
            Self::pass(fixture_name, check)
        } else {
            Self::fail(fixture_name, check)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residue(section: Section, remaining: &[&str]) -> ProfileFailure {
        ProfileFailure::Residue(SectionResidue {
            section,
            remaining: remaining.iter().map(|s| s.to_string()).collect(),
        })
    }

    // ===========================================
    // Category F1 — Types Tests
    // ===========================================

    #[test]
    fn test_scenario_meta_deserialize() {
        let json = r#"{"name":"test","description":"Test scenario"}"#;
        let meta: ScenarioMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.name, "test");
        assert_eq!(meta.description, "Test scenario");
    }

    #[test]
    fn test_profile_expectation_defaults() {
        let expectation = ProfileExpectation::new();
        assert_eq!(expectation.percent_compliant, None);
        assert!(expectation.exceptions.is_empty());
        assert_eq!(expectation.sections, Section::ALL.to_vec());
    }

    #[test]
    fn test_profile_expectation_builders() {
        let expectation = ProfileExpectation::new()
            .with_percent_compliant(99.0)
            .with_sections(vec![Section::NonCompliant]);
        assert_eq!(expectation.percent_compliant, Some(99.0));
        assert_eq!(expectation.sections, vec![Section::NonCompliant]);
    }

    #[test]
    fn test_check_report_passed_and_failed_profiles() {
        let check = CheckReport {
            outcomes: vec![
                ProfileOutcome {
                    profile: "disa_stig".to_string(),
                    sections_checked: vec![],
                    failures: vec![],
                },
                ProfileOutcome {
                    profile: "nist_800_53:rev4".to_string(),
                    sections_checked: vec![Section::NonCompliant],
                    failures: vec![
                        residue(Section::NonCompliant, &["Class[Pupmod]::facter_options"]),
                        ProfileFailure::PercentMismatch {
                            expected: 99.0,
                            actual: 98.0,
                        },
                    ],
                },
            ],
        };

        assert!(!check.passed());
        assert_eq!(check.failed_profiles(), vec!["nist_800_53:rev4"]);
        assert_eq!(check.failure_count(), 2);
    }

    #[test]
    fn test_empty_check_report_passes() {
        assert!(CheckReport::default().passed());
    }

    #[test]
    fn test_conformance_result_from_check() {
        let passing = ConformanceResult::from_check("ok", CheckReport::default());
        assert!(passing.passed);
        assert_eq!(passing.fixture_name, "ok");

        let failing = ConformanceResult::from_check(
            "bad",
            CheckReport {
                outcomes: vec![ProfileOutcome {
                    profile: "disa_stig".to_string(),
                    sections_checked: vec![],
                    failures: vec![ProfileFailure::MissingProfile],
                }],
            },
        );
        assert!(!failing.passed);
    }

    #[test]
    fn test_profile_failure_display() {
        assert_eq!(
            ProfileFailure::MissingProfile.to_string(),
            "profile missing from report"
        );
        assert_eq!(
            ProfileFailure::PercentMismatch {
                expected: 100.0,
                actual: 99.5
            }
            .to_string(),
            "percent_compliant is 99.5, expected 100"
        );
        assert_eq!(
            residue(Section::DocumentedMissingResources, &["a", "b"]).to_string(),
            "'documented_missing_resources' has 2 unexpected item(s): a, b"
        );
    }
}
