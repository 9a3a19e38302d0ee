//! Compliance Conformance Harness
//!
//! Asserts that a generated compliance report matches its expected baseline
//! once known exceptions are discounted.
//!
//! # Overview
//!
//! For each expected profile the harness:
//!
//! 1. Checks the profile is present in the report
//! 2. Compares `summary.percent_compliant` to the expected value
//! 3. Normalizes each validated section and requires it to be empty
//!
//! # Fixtures
//!
//! Fixtures live in a directory supplied by the caller (by default
//! `fixtures/` at the workspace root, or `$COMPLIANCE_FIXTURES_DIR`).
//! Each fixture is a directory containing:
//!
//! - `scenario.json` - Metadata (name, description)
//! - `report.json` - The compliance report under test
//! - `expectations.json` - Per-profile expected percentage, exceptions,
//!   and validated sections

pub mod loader;
pub mod runner;
pub mod types;

pub use loader::{
    fixtures_dir, list_fixtures, list_fixtures_in, load_expectations, load_fixture,
    load_fixture_from, load_report, parse_expectations, parse_report, LoadError,
    FIXTURES_DIR_ENV,
};
pub use runner::{
    check_profile, check_report, run_all_fixtures_in, run_fixture, run_fixture_check,
    run_fixture_in, RunError,
};
pub use types::{
    CheckReport, ConformanceResult, Expectations, Fixture, ProfileExpectation, ProfileFailure,
    ProfileOutcome, ScenarioMeta, SectionResidue,
};
