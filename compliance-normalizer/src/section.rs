//! Per-section exception filters.
//!
//! Both filters work in place on a report the caller already owns; the
//! copy isolation lives in [`crate::normalize`].

use std::collections::BTreeMap;

use compliance_schema::NonCompliantEntry;

use crate::matcher::{is_excused, Matcher};

/// Drop excused items from a list section, keeping survivor order.
///
/// Returns the number of items removed.
pub fn filter_list(items: &mut Vec<String>, matchers: &[Matcher]) -> usize {
    let before = items.len();
    items.retain(|item| !is_excused(item, matchers));
    before - items.len()
}

/// Remove exempted parameters from the non-compliant section.
///
/// A resource whose last parameter is removed here goes with it. A resource
/// that had no parameters to begin with is left as it was. Resources and
/// parameters missing from the section are ignored.
///
/// Returns the number of parameters removed.
pub fn filter_non_compliant(
    section: &mut BTreeMap<String, NonCompliantEntry>,
    exemptions: &BTreeMap<String, Vec<String>>,
) -> usize {
    let mut removed = 0;

    for (resource, parameters) in exemptions {
        let Some(entry) = section.get_mut(resource) else {
            continue;
        };

        let before = entry.parameters.len();
        for parameter in parameters {
            entry.parameters.remove(parameter);
        }
        let dropped = before - entry.parameters.len();
        removed += dropped;

        if dropped > 0 && entry.parameters.is_empty() {
            section.remove(resource);
        }
    }

    removed
}
