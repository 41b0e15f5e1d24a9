//! The closed configuration schema.
//!
//! Every recognised environment key is declared once in [`SETTINGS`]. The
//! loader, the validator, and the documentation table are all derived from
//! this table.

use serde::Serialize;
use std::collections::HashSet;

use crate::domain::errors::{ConfigurationError, IssueKind, ValidationIssue};
use crate::domain::models::{
    keys, AppEnv, LogFormat, LogLevel, SettingKind, SettingSpec, TypedConfig,
};

/// Settings recognised by the application.
pub const SETTINGS: &[SettingSpec] = &[
    SettingSpec::required(keys::API_BASE_URL, SettingKind::Url, "Base URL of the backend API"),
    SettingSpec::optional(keys::APP_ENV, SettingKind::Enum(AppEnv::NAMES), "dev", "Deployment environment"),
    SettingSpec::optional(keys::APP_NAME, SettingKind::Text, "app", "Display name, also used in the user agent"),
    SettingSpec::optional(keys::LOG_LEVEL, SettingKind::Enum(LogLevel::NAMES), "info", "Minimum log level"),
    SettingSpec::optional(keys::LOG_FORMAT, SettingKind::Enum(LogFormat::NAMES), "pretty", "Log output format"),
    SettingSpec::optional(
        keys::REQUEST_TIMEOUT_MS,
        SettingKind::Number { min: 100, max: 120_000 },
        "10000",
        "Per-request timeout in milliseconds",
    ),
    SettingSpec::optional(
        keys::MAX_RETRIES,
        SettingKind::Number { min: 0, max: 10 },
        "3",
        "Retry attempts for idempotent requests",
    ),
    SettingSpec::optional(
        keys::ANALYTICS_ENDPOINT,
        SettingKind::Url,
        "https://analytics.invalid/v1",
        "Analytics collector URL",
    ),
    SettingSpec::flag(keys::ENABLE_BETA, "Expose beta screens"),
    SettingSpec::flag(keys::ENABLE_DARK_MODE, "Offer the dark theme"),
    SettingSpec::flag(keys::ENABLE_OFFLINE_SYNC, "Queue writes while offline"),
];

/// One row of the generated settings documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocRow {
    pub key: &'static str,
    #[serde(rename = "type")]
    pub kind: String,
    pub default: Option<&'static str>,
    pub required: bool,
    pub flag: bool,
    pub description: &'static str,
}

/// A set of setting declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    specs: &'static [SettingSpec],
}

impl Default for Schema {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Schema {
    /// The application's schema.
    pub const fn builtin() -> Self {
        Self { specs: SETTINGS }
    }

    /// Wrap an arbitrary table. Call [`Self::check`] before trusting it.
    pub const fn new(specs: &'static [SettingSpec]) -> Self {
        Self { specs }
    }

    pub const fn specs(&self) -> &'static [SettingSpec] {
        self.specs
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.specs.iter().map(|spec| spec.key).collect()
    }

    pub fn get(&self, key: &str) -> Option<&'static SettingSpec> {
        self.specs.iter().find(|spec| spec.key == key)
    }

    pub fn flags(&self) -> impl Iterator<Item = &'static SettingSpec> {
        self.specs.iter().filter(|spec| spec.flag)
    }

    /// Check the table for internal consistency, reporting every problem.
    pub fn check(&self) -> Result<(), ConfigurationError> {
        let mut seen = HashSet::new();
        let mut problems = Vec::new();

        for spec in self.specs {
            if spec.key.trim().is_empty() {
                problems.push("blank key".to_string());
                continue;
            }
            if !seen.insert(spec.key) {
                problems.push(format!("{} is declared more than once", spec.key));
            }
            if spec.flag && spec.kind != SettingKind::Bool {
                problems.push(format!("flag {} is not a boolean", spec.key));
            }
            match (spec.required, spec.default_value()) {
                (true, Some(_)) => {
                    problems.push(format!("required {} declares a default", spec.key));
                }
                (false, None) => {
                    problems.push(format!("optional {} has no default", spec.key));
                }
                (false, Some(Err(issue))) => {
                    problems.push(format!("default for {issue}"));
                }
                _ => {}
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigurationError::InvalidSchema(problems.join("; ")))
        }
    }

    /// Check every declared invariant against `config`.
    ///
    /// Exhaustive: all fields are checked and every violation is returned.
    pub fn validate(&self, config: &TypedConfig) -> Vec<ValidationIssue> {
        self.specs
            .iter()
            .filter_map(|spec| match config.value(spec.key) {
                Some(value) => spec.validate(&value),
                None => Some(
                    ValidationIssue::new(spec.key, IssueKind::Missing, "field has no value")
                        .fatal(spec.required),
                ),
            })
            .collect()
    }

    /// Documentation table derived from the declarations.
    pub fn doc_rows(&self) -> Vec<DocRow> {
        self.specs
            .iter()
            .map(|spec| DocRow {
                key: spec.key,
                kind: spec.kind.type_name(),
                default: spec.default,
                required: spec.required,
                flag: spec.flag,
                description: spec.description,
            })
            .collect()
    }
}
