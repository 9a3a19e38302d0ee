//! Report normalization entry points.

use compliance_schema::{ProfileReport, ReportError, Section};

use crate::exceptions::ExceptionSpec;
use crate::section::{filter_list, filter_non_compliant};

/// Return a copy of `report` with the exceptions for `section` discounted.
///
/// The caller's report is never modified. Every other section, the summary,
/// and any unrecognized sections come back exactly as they were. An absent
/// section stays absent.
pub fn normalize(report: &ProfileReport, section: Section, exceptions: &ExceptionSpec) -> ProfileReport {
    let mut normalized = report.clone();

    match section {
        Section::NonCompliant => {
            if let Some(entries) = normalized.non_compliant.as_mut() {
                filter_non_compliant(entries, exceptions.non_compliant());
            }
        }
        Section::DocumentedMissingParameters | Section::DocumentedMissingResources => {
            if let Some(items) = normalized.list_section_mut(section) {
                filter_list(items, exceptions.matchers(section));
            }
        }
    }

    normalized
}

/// [`normalize`] with the section given by its report key.
pub fn normalize_section(
    report: &ProfileReport,
    section_name: &str,
    exceptions: &ExceptionSpec,
) -> Result<ProfileReport, ReportError> {
    let section: Section = section_name.parse()?;
    Ok(normalize(report, section, exceptions))
}

/// Discount exceptions from every section in turn.
pub fn normalize_all(report: &ProfileReport, exceptions: &ExceptionSpec) -> ProfileReport {
    Section::ALL
        .into_iter()
        .fold(report.clone(), |current, section| {
            normalize(&current, section, exceptions)
        })
}
