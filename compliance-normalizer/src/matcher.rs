//! Exception matchers for list sections.

use fancy_regex::Regex;

use crate::error::ExceptionError;

/// A single exception rule for a list section item.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Matches an item equal to the value.
    Exact(String),
    /// Matches an item the regex finds a match anywhere in. Look-around is
    /// supported.
    Pattern(Regex),
}

impl Matcher {
    /// Create an exact-value matcher.
    pub fn exact(value: impl Into<String>) -> Self {
        Matcher::Exact(value.into())
    }

    /// Compile a pattern matcher.
    pub fn pattern(pattern: &str) -> Result<Self, ExceptionError> {
        Regex::new(pattern)
            .map(Matcher::Pattern)
            .map_err(|source| ExceptionError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Check whether this matcher matches `item`.
    ///
    /// Patterns are unanchored unless the pattern itself anchors.
    pub fn matches(&self, item: &str) -> bool {
        match self {
            Matcher::Exact(value) => value == item,
            Matcher::Pattern(regex) => pattern_matches(regex, item),
        }
    }
}

/// A pattern that exhausts the backtracking limit counts as no match, so the
/// item stays in the report and shows up as residue.
fn pattern_matches(regex: &Regex, item: &str) -> bool {
    regex.is_match(item).unwrap_or(false)
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Matcher::Exact(a), Matcher::Exact(b)) => a == b,
            (Matcher::Pattern(a), Matcher::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

/// Decide whether `item` is excused by `matchers`, evaluated in order.
///
/// A matching `Pattern` excuses the item and ends evaluation. Each `Exact`
/// replaces the verdict with its own comparison, so only the last `Exact`
/// seen counts. Existing exception lists were written against this
/// last-write-wins behavior and depend on it.
pub fn is_excused(item: &str, matchers: &[Matcher]) -> bool {
    let mut excused = false;

    for matcher in matchers {
        match matcher {
            Matcher::Pattern(regex) => {
                if pattern_matches(regex, item) {
                    return true;
                }
            }
            Matcher::Exact(value) => excused = value == item,
        }
    }

    excused
}
