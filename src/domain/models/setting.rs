//! Setting declarations and per-type coercion.
//!
//! A [`SettingSpec`] is one row of the configuration schema. It knows how to
//! turn a raw environment string into a [`SettingValue`] and how to check a
//! value against the field's invariant.

use serde::Serialize;
use std::fmt;
use url::Url;

use crate::domain::errors::{IssueKind, ParseIssue, ValidationIssue};

/// Spellings that coerce to `true` (compared case-insensitively).
pub const TRUTHY: &[&str] = &["true", "1", "yes"];

/// Spellings that coerce to `false` (compared case-insensitively).
pub const FALSY: &[&str] = &["false", "0", "no", ""];

/// URL schemes accepted by [`SettingKind::Url`].
const URL_SCHEMES: &[&str] = &["http", "https"];

/// Coerce a raw string with the fixed boolean vocabulary.
pub fn parse_bool(raw: &str) -> Result<bool, ParseIssue> {
    let normalized = raw.trim().to_ascii_lowercase();
    if TRUTHY.contains(&normalized.as_str()) {
        Ok(true)
    } else if FALSY.contains(&normalized.as_str()) {
        Ok(false)
    } else {
        Err(ParseIssue::new(raw, "a boolean (true/1/yes or false/0/no)"))
    }
}

/// A key/value pair as found in the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSetting {
    pub key: String,
    pub value: Option<String>,
}

impl RawSetting {
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Semantic type of a setting, including the bounds its validator enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Bool,
    /// Signed integer within `min..=max`.
    Number { min: i64, max: i64 },
    /// Absolute `http`/`https` URL with a host.
    Url,
    /// One of a closed set of lowercase names.
    Enum(&'static [&'static str]),
    /// Non-empty string.
    Text,
}

impl SettingKind {
    /// Coerce a raw string into a value of this kind.
    ///
    /// Only checks shape; bounds and other invariants are left to [`Self::check`].
    pub fn parse(&self, raw: &str) -> Result<SettingValue, ParseIssue> {
        let trimmed = raw.trim();
        match self {
            Self::Bool => parse_bool(raw).map(SettingValue::Bool),
            Self::Number { .. } => trimmed
                .parse::<i64>()
                .map(SettingValue::Number)
                .map_err(|_| ParseIssue::new(raw, "an integer")),
            Self::Url => Url::parse(trimmed)
                .map(SettingValue::Url)
                .map_err(|e| ParseIssue::new(raw, format!("a URL ({e})"))),
            Self::Enum(members) => members
                .iter()
                .find(|member| member.eq_ignore_ascii_case(trimmed))
                .map(|member| SettingValue::Enum((*member).to_string()))
                .ok_or_else(|| ParseIssue::new(raw, self.type_name())),
            Self::Text => Ok(SettingValue::Text(trimmed.to_string())),
        }
    }

    /// Check a value against this kind's invariant.
    pub fn check(&self, value: &SettingValue) -> Result<(), String> {
        match (self, value) {
            (Self::Bool, SettingValue::Bool(_)) => Ok(()),
            (Self::Number { min, max }, SettingValue::Number(n)) => {
                if (*min..=*max).contains(n) {
                    Ok(())
                } else {
                    Err(format!("{n} is outside [{min}, {max}]"))
                }
            }
            (Self::Url, SettingValue::Url(url)) => {
                if !URL_SCHEMES.contains(&url.scheme()) {
                    Err(format!("scheme '{}' is not one of http, https", url.scheme()))
                } else if url.host_str().is_none_or(str::is_empty) {
                    Err(format!("{url} has no host"))
                } else {
                    Ok(())
                }
            }
            (Self::Enum(members), SettingValue::Enum(name)) => {
                if members.contains(&name.as_str()) {
                    Ok(())
                } else {
                    Err(format!("'{name}' is not {}", self.type_name()))
                }
            }
            (Self::Text, SettingValue::Text(text)) => {
                if text.trim().is_empty() {
                    Err("must not be empty".to_string())
                } else {
                    Ok(())
                }
            }
            (kind, value) => Err(format!("expected {}, found {value:?}", kind.type_name())),
        }
    }

    /// Human-readable type description, used in messages and docs.
    pub fn type_name(&self) -> String {
        match self {
            Self::Bool => "boolean".to_string(),
            Self::Number { min, max } => format!("integer in [{min}, {max}]"),
            Self::Url => "http(s) URL".to_string(),
            Self::Enum(members) => format!("one of {{{}}}", members.join(", ")),
            Self::Text => "non-empty string".to_string(),
        }
    }
}

/// A coerced setting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Number(i64),
    Url(Url),
    Enum(String),
    Text(String),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Url(url) => write!(f, "{url}"),
            Self::Enum(s) | Self::Text(s) => f.write_str(s),
        }
    }
}

/// One row of the configuration schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingSpec {
    pub key: &'static str,
    pub kind: SettingKind,
    /// Raw default, coerced with the same parser as environment values.
    pub default: Option<&'static str>,
    pub required: bool,
    /// Exposed through feature-flag lookup.
    pub flag: bool,
    pub description: &'static str,
}

impl SettingSpec {
    /// Optional setting with the given default.
    pub const fn optional(
        key: &'static str,
        kind: SettingKind,
        default: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            kind,
            default: Some(default),
            required: false,
            flag: false,
            description,
        }
    }

    /// Required setting: no default, absence is fatal.
    pub const fn required(key: &'static str, kind: SettingKind, description: &'static str) -> Self {
        Self {
            key,
            kind,
            default: None,
            required: true,
            flag: false,
            description,
        }
    }

    /// Boolean feature flag, default `false`.
    pub const fn flag(key: &'static str, description: &'static str) -> Self {
        Self {
            key,
            kind: SettingKind::Bool,
            default: Some("false"),
            required: false,
            flag: true,
            description,
        }
    }

    /// Parse and check a raw value.
    ///
    /// The returned issue is fatal exactly when the setting is required.
    pub fn coerce(&self, raw: &str) -> Result<SettingValue, ValidationIssue> {
        let value = self
            .kind
            .parse(raw)
            .map_err(|e| ValidationIssue::from_parse(self.key, &e).fatal(self.required))?;
        match self.validate(&value) {
            Some(issue) => Err(issue),
            None => Ok(value),
        }
    }

    /// Check a value against this setting's invariant.
    pub fn validate(&self, value: &SettingValue) -> Option<ValidationIssue> {
        self.kind.check(value).err().map(|message| {
            ValidationIssue::new(self.key, IssueKind::Invalid, message).fatal(self.required)
        })
    }

    /// Coerce the declared default, if there is one.
    pub fn default_value(&self) -> Option<Result<SettingValue, ValidationIssue>> {
        self.default.map(|raw| self.coerce(raw))
    }
}
