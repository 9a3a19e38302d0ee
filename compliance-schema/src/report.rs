//! Compliance report types.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Report sections the normalizer knows how to discount exceptions from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    NonCompliant,
    DocumentedMissingParameters,
    DocumentedMissingResources,
}

impl Section {
    /// All sections, in the order reports are validated.
    pub const ALL: [Section; 3] = [
        Section::NonCompliant,
        Section::DocumentedMissingParameters,
        Section::DocumentedMissingResources,
    ];

    /// The key this section is stored under in the report document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::NonCompliant => "non_compliant",
            Section::DocumentedMissingParameters => "documented_missing_parameters",
            Section::DocumentedMissingResources => "documented_missing_resources",
        }
    }

    /// Whether the section is a flat list of identifiers.
    pub fn is_list(&self) -> bool {
        !matches!(self, Section::NonCompliant)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| ReportError::UnknownSection(s.to_string()))
    }
}

/// Profile-level summary numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub percent_compliant: f64,
    /// Remaining summary fields, carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Summary {
    pub fn new(percent_compliant: f64) -> Self {
        Self {
            percent_compliant,
            extra: BTreeMap::new(),
        }
    }
}

/// One resource that failed a compliance check.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NonCompliantEntry {
    /// Parameter name to check detail. Detail values are opaque.
    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl NonCompliantEntry {
    /// Build an entry from `(parameter, detail)` pairs.
    pub fn with_parameters<I, K>(parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            parameters: parameters
                .into_iter()
                .map(|(name, detail)| (name.into(), detail))
                .collect(),
            extra: BTreeMap::new(),
        }
    }
}

/// Compliance results for a single profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    pub summary: Summary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documented_missing_parameters: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documented_missing_resources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_compliant: Option<BTreeMap<String, NonCompliantEntry>>,
    /// Sections the normalizer does not handle (e.g. `compliant`).
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl ProfileReport {
    /// Create a report with only a summary and no sections.
    pub fn new(percent_compliant: f64) -> Self {
        Self {
            summary: Summary::new(percent_compliant),
            documented_missing_parameters: None,
            documented_missing_resources: None,
            non_compliant: None,
            other: BTreeMap::new(),
        }
    }

    /// Builder: set the documented_missing_parameters section.
    pub fn with_documented_missing_parameters<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.documented_missing_parameters = Some(items.into_iter().map(Into::into).collect());
        self
    }

    /// Builder: set the documented_missing_resources section.
    pub fn with_documented_missing_resources<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.documented_missing_resources = Some(items.into_iter().map(Into::into).collect());
        self
    }

    /// Builder: set the non_compliant section.
    pub fn with_non_compliant<I, K>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, NonCompliantEntry)>,
        K: Into<String>,
    {
        self.non_compliant = Some(
            entries
                .into_iter()
                .map(|(resource, entry)| (resource.into(), entry))
                .collect(),
        );
        self
    }

    /// List section by name. `None` for `NonCompliant` or an absent section.
    pub fn list_section(&self, section: Section) -> Option<&Vec<String>> {
        match section {
            Section::DocumentedMissingParameters => self.documented_missing_parameters.as_ref(),
            Section::DocumentedMissingResources => self.documented_missing_resources.as_ref(),
            Section::NonCompliant => None,
        }
    }

    /// Mutable access to a list section.
    pub fn list_section_mut(&mut self, section: Section) -> Option<&mut Vec<String>> {
        match section {
            Section::DocumentedMissingParameters => self.documented_missing_parameters.as_mut(),
            Section::DocumentedMissingResources => self.documented_missing_resources.as_mut(),
            Section::NonCompliant => None,
        }
    }

    /// Whether the report carries the section at all.
    pub fn has_section(&self, section: Section) -> bool {
        match section {
            Section::NonCompliant => self.non_compliant.is_some(),
            _ => self.list_section(section).is_some(),
        }
    }

    /// Number of entries in a section, or `None` when it is absent.
    pub fn section_len(&self, section: Section) -> Option<usize> {
        match section {
            Section::NonCompliant => self.non_compliant.as_ref().map(BTreeMap::len),
            _ => self.list_section(section).map(Vec::len),
        }
    }

    /// True when the section is absent or has no entries.
    pub fn section_is_empty(&self, section: Section) -> bool {
        self.section_len(section).unwrap_or(0) == 0
    }

    /// Identifiers left in a section.
    ///
    /// List sections yield their items verbatim. Non-compliant entries yield
    /// `resource::parameter` per parameter, or the bare resource when it has
    /// no parameters.
    pub fn residue(&self, section: Section) -> Vec<String> {
        match section {
            Section::NonCompliant => {
                let Some(entries) = &self.non_compliant else {
                    return Vec::new();
                };
                let mut out = Vec::new();
                for (resource, entry) in entries {
                    if entry.parameters.is_empty() {
                        out.push(resource.clone());
                    }
                    for parameter in entry.parameters.keys() {
                        out.push(format!("{}::{}", resource, parameter));
                    }
                }
                out
            }
            _ => self.list_section(section).cloned().unwrap_or_default(),
        }
    }

    /// Deserialize a single profile report from JSON.
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The full report document, keyed by compliance profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComplianceReport {
    #[serde(default)]
    pub compliance_profiles: BTreeMap<String, ProfileReport>,
    /// Document-level metadata (version, timestamps, ...).
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl ComplianceReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a profile.
    pub fn with_profile(mut self, name: impl Into<String>, profile: ProfileReport) -> Self {
        self.compliance_profiles.insert(name.into(), profile);
        self
    }

    /// Look up the report for one profile.
    pub fn profile(&self, name: &str) -> Option<&ProfileReport> {
        self.compliance_profiles.get(name)
    }

    /// Profile names in sorted order.
    pub fn profile_names(&self) -> Vec<&str> {
        self.compliance_profiles.keys().map(String::as_str).collect()
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Errors that can occur when working with reports.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown report section: {0}")]
    UnknownSection(String),
}
