//! Error types for exception specs.

/// Errors raised while building an exception spec.
///
/// Both variants surface before any report is touched.
#[derive(Debug, thiserror::Error)]
pub enum ExceptionError {
    #[error("invalid exception pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: fancy_regex::Error,
    },

    #[error("malformed exception spec at {path}: {reason}")]
    MalformedExceptionSpec { path: String, reason: String },

    #[error("failed to parse exception spec JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExceptionError {
    pub(crate) fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ExceptionError::MalformedExceptionSpec {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
