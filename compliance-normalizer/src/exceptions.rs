//! Exception specs: the pre-approved deviations for one compliance profile.
//!
//! JSON format:
//!
//! ```json
//! {
//!   "documented_missing_parameters": ["Class[Foo]::bar", {"pattern": "^Class\\[Baz\\]"}],
//!   "documented_missing_resources": [{"exact": "Cron[foo]"}],
//!   "non_compliant": {"Class[Pupmod]": ["facter_options"]}
//! }
//! ```
//!
//! - A bare string or `{"exact": ...}` is an exact matcher
//! - `{"pattern": ...}` is a regex, compiled once here
//! - Every key is optional

use std::collections::BTreeMap;

use compliance_schema::Section;
use serde_json::{Map, Value};

use crate::error::ExceptionError;
use crate::matcher::Matcher;

/// Exceptions to discount from one profile's report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExceptionSpec {
    documented_missing_parameters: Vec<Matcher>,
    documented_missing_resources: Vec<Matcher>,
    non_compliant: BTreeMap<String, Vec<String>>,
}

impl ExceptionSpec {
    /// A spec that excuses nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> ExceptionSpecBuilder {
        ExceptionSpecBuilder::default()
    }

    /// Matchers for a list section, in declared order.
    ///
    /// Always empty for `NonCompliant`; see [`ExceptionSpec::non_compliant`].
    pub fn matchers(&self, section: Section) -> &[Matcher] {
        match section {
            Section::DocumentedMissingParameters => &self.documented_missing_parameters,
            Section::DocumentedMissingResources => &self.documented_missing_resources,
            Section::NonCompliant => &[],
        }
    }

    /// Resource to exempted parameter names.
    pub fn non_compliant(&self) -> &BTreeMap<String, Vec<String>> {
        &self.non_compliant
    }

    pub fn is_empty(&self) -> bool {
        self.documented_missing_parameters.is_empty()
            && self.documented_missing_resources.is_empty()
            && self.non_compliant.is_empty()
    }

    /// Parse a spec from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ExceptionError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Build a spec from an already-parsed JSON value.
    ///
    /// The whole shape is validated and every pattern compiled before this
    /// returns.
    pub fn from_value(value: &Value) -> Result<Self, ExceptionError> {
        let object = match value {
            Value::Object(object) => object,
            Value::Null => return Ok(Self::empty()),
            _ => return Err(ExceptionError::malformed("$", "expected an object")),
        };

        let mut spec = Self::empty();
        for (key, entry) in object {
            let section: Section = key
                .parse()
                .map_err(|_| ExceptionError::malformed(key.as_str(), "unknown section"))?;

            match section {
                Section::NonCompliant => spec.non_compliant = parse_exemptions(entry)?,
                Section::DocumentedMissingParameters => {
                    spec.documented_missing_parameters = parse_matchers(section, entry)?
                }
                Section::DocumentedMissingResources => {
                    spec.documented_missing_resources = parse_matchers(section, entry)?
                }
            }
        }

        Ok(spec)
    }
}

fn parse_matchers(section: Section, value: &Value) -> Result<Vec<Matcher>, ExceptionError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        _ => {
            return Err(ExceptionError::malformed(
                section.as_str(),
                "expected an array of matchers",
            ))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_matcher(&format!("{}[{}]", section, index), item))
        .collect()
}

fn parse_matcher(path: &str, value: &Value) -> Result<Matcher, ExceptionError> {
    match value {
        Value::String(exact) => Ok(Matcher::exact(exact.as_str())),
        Value::Object(object) => parse_tagged_matcher(path, object),
        _ => Err(ExceptionError::malformed(
            path,
            "expected a string or an {\"exact\"|\"pattern\": string} object",
        )),
    }
}

fn parse_tagged_matcher(path: &str, object: &Map<String, Value>) -> Result<Matcher, ExceptionError> {
    if object.len() != 1 {
        return Err(ExceptionError::malformed(
            path,
            "matcher object must have exactly one key",
        ));
    }

    let Some((kind, inner)) = object.iter().next() else {
        return Err(ExceptionError::malformed(path, "empty matcher object"));
    };
    let Value::String(text) = inner else {
        return Err(ExceptionError::malformed(
            format!("{}.{}", path, kind),
            "expected a string",
        ));
    };

    match kind.as_str() {
        "exact" => Ok(Matcher::exact(text.as_str())),
        "pattern" => Matcher::pattern(text),
        other => Err(ExceptionError::malformed(
            path,
            format!("unknown matcher kind {:?}", other),
        )),
    }
}

fn parse_exemptions(value: &Value) -> Result<BTreeMap<String, Vec<String>>, ExceptionError> {
    let resources = match value {
        Value::Object(resources) => resources,
        Value::Null => return Ok(BTreeMap::new()),
        _ => {
            return Err(ExceptionError::malformed(
                Section::NonCompliant.as_str(),
                "expected an object of resource to parameter names",
            ))
        }
    };

    let mut exemptions = BTreeMap::new();
    for (resource, parameters) in resources {
        let path = format!("{}.{}", Section::NonCompliant, resource);
        let Value::Array(parameters) = parameters else {
            return Err(ExceptionError::malformed(path, "expected an array of parameter names"));
        };

        let names = parameters
            .iter()
            .enumerate()
            .map(|(index, name)| match name {
                Value::String(name) => Ok(name.clone()),
                _ => Err(ExceptionError::malformed(
                    format!("{}[{}]", path, index),
                    "expected a parameter name string",
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;

        exemptions.insert(resource.clone(), names);
    }

    Ok(exemptions)
}

/// Programmatic construction of an [`ExceptionSpec`].
#[derive(Debug, Clone, Default)]
pub struct ExceptionSpecBuilder {
    spec: ExceptionSpec,
}

impl ExceptionSpecBuilder {
    /// Append a matcher to a list section.
    pub fn matcher(mut self, section: Section, matcher: Matcher) -> Result<Self, ExceptionError> {
        match section {
            Section::DocumentedMissingParameters => {
                self.spec.documented_missing_parameters.push(matcher)
            }
            Section::DocumentedMissingResources => {
                self.spec.documented_missing_resources.push(matcher)
            }
            Section::NonCompliant => {
                return Err(ExceptionError::malformed(
                    section.as_str(),
                    "non_compliant takes resource exemptions, not matchers",
                ))
            }
        }
        Ok(self)
    }

    /// Append an exact matcher to a list section.
    pub fn exact(self, section: Section, value: impl Into<String>) -> Result<Self, ExceptionError> {
        self.matcher(section, Matcher::exact(value))
    }

    /// Compile and append a pattern matcher to a list section.
    pub fn pattern(self, section: Section, pattern: &str) -> Result<Self, ExceptionError> {
        let matcher = Matcher::pattern(pattern)?;
        self.matcher(section, matcher)
    }

    /// Exempt parameters of a non-compliant resource.
    pub fn exempt<I, S>(mut self, resource: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec
            .non_compliant
            .entry(resource.into())
            .or_default()
            .extend(parameters.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> ExceptionSpec {
        self.spec
    }
}
