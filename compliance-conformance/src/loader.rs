//! Fixture and expectation loading utilities.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use compliance_normalizer::{ExceptionError, ExceptionSpec};
use compliance_schema::{ComplianceReport, ReportError, Section};
use serde::Deserialize;
use serde_json::Value;

use crate::types::{Expectations, Fixture, ProfileExpectation, ScenarioMeta};

/// Environment variable overriding the default fixtures directory.
pub const FIXTURES_DIR_ENV: &str = "COMPLIANCE_FIXTURES_DIR";

/// Errors that can occur when loading fixtures.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("fixture not found: {0}")]
    NotFound(String),

    #[error("missing file in fixture: {0}")]
    MissingFile(String),

    #[error("failed to read file {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON in {path}: {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode compliance report {path}: {source}")]
    Report {
        path: String,
        #[source]
        source: ReportError,
    },

    #[error("invalid exceptions for profile {profile} in {path}: {source}")]
    Exceptions {
        path: String,
        profile: String,
        #[source]
        source: ExceptionError,
    },
}

/// On-disk shape of one profile expectation.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawExpectation {
    #[serde(default)]
    percent_compliant: Option<f64>,
    #[serde(default)]
    exceptions: Value,
    #[serde(default)]
    sections: Option<Vec<Section>>,
}

/// Get the fixtures directory path.
///
/// `COMPLIANCE_FIXTURES_DIR` wins when set; otherwise `fixtures/` at the
/// workspace root.
pub fn fixtures_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(FIXTURES_DIR_ENV) {
        return PathBuf::from(dir);
    }

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let path = Path::new(&manifest_dir);

    // From the compliance-conformance crate, the workspace root is one level up
    if path.ends_with("compliance-conformance") {
        path.parent().unwrap_or(path).join("fixtures")
    } else {
        path.join("fixtures")
    }
}

/// List all fixture names in the default fixtures directory.
pub fn list_fixtures() -> Result<Vec<String>, LoadError> {
    list_fixtures_in(&fixtures_dir())
}

/// List fixture names (subdirectories) under `root`, sorted.
pub fn list_fixtures_in(root: &Path) -> Result<Vec<String>, LoadError> {
    if !root.exists() {
        return Ok(vec![]);
    }

    let mut fixtures = Vec::new();
    let entries = std::fs::read_dir(root).map_err(|e| LoadError::ReadError {
        path: root.display().to_string(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| LoadError::ReadError {
            path: root.display().to_string(),
            source: e,
        })?;

        let path = entry.path();
        if path.is_dir() {
            if let Some(name) = path.file_name() {
                fixtures.push(name.to_string_lossy().to_string());
            }
        }
    }

    fixtures.sort();
    Ok(fixtures)
}

/// Load a fixture by name from the default fixtures directory.
pub fn load_fixture(name: &str) -> Result<Fixture, LoadError> {
    load_fixture_from(&fixtures_dir(), name)
}

/// Load a fixture by name from `root`.
pub fn load_fixture_from(root: &Path, name: &str) -> Result<Fixture, LoadError> {
    let fixture_dir = root.join(name);
    if !fixture_dir.exists() {
        return Err(LoadError::NotFound(name.to_string()));
    }

    let meta = load_scenario_meta(&fixture_dir)?;
    let report = load_report(&required_file(&fixture_dir, "report.json")?)?;
    let expectations = load_expectations(&required_file(&fixture_dir, "expectations.json")?)?;

    Ok(Fixture {
        meta,
        report,
        expectations,
    })
}

/// Load and decode a compliance report file.
pub fn load_report(path: &Path) -> Result<ComplianceReport, LoadError> {
    let content = read_file(path)?;
    parse_report(&content, path)
}

/// Load and decode an expectations file.
pub fn load_expectations(path: &Path) -> Result<Expectations, LoadError> {
    let content = read_file(path)?;
    parse_expectations(&content, path)
}

/// Decode compliance report JSON. `path` is only used for error context.
pub fn parse_report(content: &str, path: &Path) -> Result<ComplianceReport, LoadError> {
    ComplianceReport::from_json(content).map_err(|e| LoadError::Report {
        path: path.display().to_string(),
        source: e,
    })
}

/// Decode expectations JSON. `path` is only used for error context.
///
/// Every profile's exception spec is built here, so malformed specs and
/// bad patterns surface before any report is checked.
pub fn parse_expectations(content: &str, path: &Path) -> Result<Expectations, LoadError> {
    let raw: BTreeMap<String, RawExpectation> =
        serde_json::from_str(content).map_err(|e| LoadError::JsonError {
            path: path.display().to_string(),
            source: e,
        })?;

    let mut expectations = Expectations::new();
    for (profile, raw) in raw {
        let exceptions =
            ExceptionSpec::from_value(&raw.exceptions).map_err(|e| LoadError::Exceptions {
                path: path.display().to_string(),
                profile: profile.clone(),
                source: e,
            })?;

        let expectation = ProfileExpectation {
            percent_compliant: raw.percent_compliant,
            exceptions,
            sections: raw.sections.unwrap_or_else(|| Section::ALL.to_vec()),
        };
        expectations.profiles.insert(profile, expectation);
    }

    Ok(expectations)
}

/// Load scenario metadata.
fn load_scenario_meta(fixture_dir: &Path) -> Result<ScenarioMeta, LoadError> {
    let path = fixture_dir.join("scenario.json");
    let content = read_file(&path)?;
    serde_json::from_str(&content).map_err(|e| LoadError::JsonError {
        path: path.display().to_string(),
        source: e,
    })
}

/// Resolve a file that must exist in the fixture.
fn required_file(fixture_dir: &Path, filename: &str) -> Result<PathBuf, LoadError> {
    let path = fixture_dir.join(filename);
    if !path.exists() {
        return Err(LoadError::MissingFile(filename.to_string()));
    }
    Ok(path)
}

/// Read a file to string.
fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|e| LoadError::ReadError {
        path: path.display().to_string(),
        source: e,
    })
}
