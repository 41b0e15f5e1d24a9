//! Resolution of raw environment values into a [`TypedConfig`].
//!
//! Each declared setting is coerced and validated on its own, so one bad
//! override never hides another. Optional settings fall back to their
//! defaults; required ones fail the load.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::schema::Schema;
use crate::domain::errors::{ConfigurationError, IssueKind, ValidationIssue};
use crate::domain::models::{FeatureFlags, RawSetting, SettingSpec, SettingValue, TypedConfig};
use crate::domain::ports::EnvSource;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    /// Set in the environment and accepted
    Environment,
    /// Declared default, because the key was unset or rejected
    Default,
}

impl ValueSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::Default => "default",
        }
    }
}

/// Outcome of a successful load: the config plus non-fatal diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The resolved configuration
    pub config: TypedConfig,
    /// Overrides that were ignored, in schema order.
    pub diagnostics: Vec<ValidationIssue>,
    /// Origin of every resolved field.
    pub sources: BTreeMap<&'static str, ValueSource>,
}

impl Resolution {
    /// Origin of the value resolved for `key`.
    pub fn source_of(&self, key: &str) -> Option<ValueSource> {
        self.sources.get(key).copied()
    }

    /// Emit every diagnostic as a warning.
    ///
    /// Separate from loading so callers can do it once logging is up.
    pub fn log_diagnostics(&self) {
        for issue in &self.diagnostics {
            warn!(key = %issue.key, kind = %issue.kind, "Ignoring configuration override: {}", issue.message);
        }
    }
}

/// Resolves raw environment values against a schema
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigLoader {
    schema: Schema,
}

impl ConfigLoader {
    pub const fn new(schema: Schema) -> Self {
        Self { schema }
    }

    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Load configuration from an environment source
    ///
    /// Order per field:
    /// 1. Raw value from the source, if set
    /// 2. Per-type parser and validator
    /// 3. Declared default when the value is unset or rejected
    ///
    /// Rejected optional values become diagnostics. A required field that is
    /// unset or rejected fails the whole load with every issue attached.
    pub fn load(&self, source: &dyn EnvSource) -> Result<Resolution, ConfigurationError> {
        self.schema.check()?;
        let raw = source.snapshot(&self.schema.keys());
        self.resolve(&raw)
    }

    /// Resolve an already captured snapshot.
    pub fn resolve(&self, raw: &[RawSetting]) -> Result<Resolution, ConfigurationError> {
        let mut values = BTreeMap::new();
        let mut sources = BTreeMap::new();
        let mut issues = Vec::new();

        for spec in self.schema.specs() {
            let raw_value = raw
                .iter()
                .find(|setting| setting.key == spec.key)
                .and_then(|setting| setting.value.as_deref());

            if let Some((value, source)) = resolve_field(spec, raw_value, &mut issues) {
                values.insert(spec.key, value);
                sources.insert(spec.key, source);
            }
        }

        if issues.iter().any(|issue| issue.fatal) {
            return Err(ConfigurationError::Unresolved { issues });
        }

        let flags: FeatureFlags = self
            .schema
            .flags()
            .map(|spec| {
                let on = matches!(values.get(spec.key), Some(SettingValue::Bool(true)));
                (spec.key.to_string(), on)
            })
            .collect();

        let config = TypedConfig::compose(&values, flags)?;
        Ok(Resolution {
            config,
            diagnostics: issues,
            sources,
        })
    }

    /// Validate a config against every declared invariant
    pub fn validate(&self, config: &TypedConfig) -> Vec<ValidationIssue> {
        self.schema.validate(config)
    }
}

/// Resolve one field, recording any issue.
///
/// Returns `None` only when the field cannot be resolved at all, in which
/// case a fatal issue has been pushed.
fn resolve_field(
    spec: &SettingSpec,
    raw: Option<&str>,
    issues: &mut Vec<ValidationIssue>,
) -> Option<(SettingValue, ValueSource)> {
    match raw {
        Some(raw) => match spec.coerce(raw) {
            Ok(value) => {
                debug!(key = spec.key, "Using environment value");
                return Some((value, ValueSource::Environment));
            }
            Err(issue) => {
                let fatal = issue.fatal;
                issues.push(issue);
                if fatal {
                    return None;
                }
            }
        },
        None if spec.required => {
            issues.push(
                ValidationIssue::new(spec.key, IssueKind::Missing, "required setting is not set")
                    .fatal(true),
            );
            return None;
        }
        None => {}
    }

    match spec.default_value() {
        Some(Ok(value)) => {
            debug!(key = spec.key, "Using default value");
            Some((value, ValueSource::Default))
        }
        Some(Err(issue)) => {
            issues.push(issue.fatal(true));
            None
        }
        None => {
            issues.push(
                ValidationIssue::new(spec.key, IssueKind::Missing, "no value and no default")
                    .fatal(true),
            );
            None
        }
    }
}
