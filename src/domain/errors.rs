//! Domain errors for configuration resolution.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Format the fatal issues of a failed resolution, separated by `; `.
fn format_fatal_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .filter(|issue| issue.fatal)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single raw value that could not be coerced into its declared type.
///
/// Always recoverable: the loader substitutes the declared default and turns
/// the issue into a [`ValidationIssue`] of kind [`IssueKind::Parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse {raw:?} as {expected}")]
pub struct ParseIssue {
    /// The raw string as found in the environment.
    pub raw: String,
    /// Human-readable description of the accepted shape.
    pub expected: String,
}

impl ParseIssue {
    pub fn new(raw: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            expected: expected.into(),
        }
    }
}

/// Category of a [`ValidationIssue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// The raw value failed type coercion.
    Parse,
    /// The value coerced but violates the field's validator.
    Invalid,
    /// No value at all, and none can be substituted.
    Missing,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Parse => "parse",
            Self::Invalid => "invalid",
            Self::Missing => "missing",
        };
        f.write_str(label)
    }
}

/// A field that violated its declared invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub key: String,
    pub kind: IssueKind,
    pub message: String,
    /// True when the field is required, so the issue aborts resolution.
    pub fatal: bool,
}

impl ValidationIssue {
    pub fn new(key: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind,
            message: message.into(),
            fatal: false,
        }
    }

    /// Mark the issue as fatal.
    #[must_use]
    pub fn fatal(mut self, fatal: bool) -> Self {
        self.fatal = fatal;
        self
    }

    /// Build a parse issue for `key` from a coercion failure.
    pub fn from_parse(key: impl Into<String>, issue: &ParseIssue) -> Self {
        Self::new(key, IssueKind::Parse, issue.to_string())
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.key, self.kind, self.message)
    }
}

/// Fatal configuration errors.
///
/// Cloneable because the store caches the outcome of the single load and
/// hands the same error to every caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// One or more required settings could not be resolved.
    ///
    /// `issues` holds every issue found during the load, fatal or not.
    #[error("Required configuration could not be resolved: {}", format_fatal_issues(.issues))]
    Unresolved { issues: Vec<ValidationIssue> },

    /// The declared schema itself is inconsistent.
    #[error("Invalid configuration schema: {0}")]
    InvalidSchema(String),
}

impl ConfigurationError {
    /// All issues recorded before the failure; empty for schema errors.
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::Unresolved { issues } => issues,
            Self::InvalidSchema(_) => &[],
        }
    }

    /// Whether a fatal issue concerns `key`.
    pub fn mentions(&self, key: &str) -> bool {
        self.issues().iter().any(|issue| issue.fatal && issue.key == key)
    }
}
