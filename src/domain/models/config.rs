//! Typed application configuration and its derived values.

use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

use super::setting::SettingValue;
use crate::domain::errors::ConfigurationError;

/// Environment keys recognised by the application.
pub mod keys {
    pub const API_BASE_URL: &str = "API_BASE_URL";
    pub const APP_ENV: &str = "APP_ENV";
    pub const APP_NAME: &str = "APP_NAME";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
    pub const REQUEST_TIMEOUT_MS: &str = "REQUEST_TIMEOUT_MS";
    pub const MAX_RETRIES: &str = "MAX_RETRIES";
    pub const ANALYTICS_ENDPOINT: &str = "ANALYTICS_ENDPOINT";
    pub const ENABLE_BETA: &str = "ENABLE_BETA";
    pub const ENABLE_DARK_MODE: &str = "ENABLE_DARK_MODE";
    pub const ENABLE_OFFLINE_SYNC: &str = "ENABLE_OFFLINE_SYNC";
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    /// Local development
    Dev,
    /// Pre-production
    Staging,
    /// Production
    Prod,
}

impl AppEnv {
    /// Accepted names, lowercase.
    pub const NAMES: &'static [&'static str] = &["dev", "staging", "prod"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Staging => "staging",
            Self::Prod => "prod",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dev" => Some(Self::Dev),
            "staging" => Some(Self::Staging),
            "prod" => Some(Self::Prod),
            _ => None,
        }
    }
}

/// Log level: trace, debug, info, warn, error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Accepted names, from most to least verbose.
    pub const NAMES: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// Log format: pretty or json
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Accepted names.
    pub const NAMES: &'static [&'static str] = &["pretty", "json"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Resolved feature flags, keyed by their environment name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FeatureFlags(BTreeMap<String, bool>);

impl FeatureFlags {
    /// Unknown names are simply disabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Names of all flags that are switched on, in key order.
    pub fn enabled(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, bool)> for FeatureFlags {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Fully resolved application configuration.
///
/// Built once by the loader; every field always holds a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypedConfig {
    /// Base URL of the backend API
    pub api_base_url: Url,

    /// Deployment environment
    pub app_env: AppEnv,

    /// Display name, also used in the user agent
    pub app_name: String,

    /// Minimum level emitted by the logger
    pub log_level: LogLevel,

    /// Log output format on stderr
    pub log_format: LogFormat,

    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,

    /// Retry attempts for idempotent requests
    pub max_retries: u32,

    /// Analytics collector URL
    pub analytics_endpoint: Url,

    /// Every declared feature flag, resolved to on or off
    pub flags: FeatureFlags,
}

impl TypedConfig {
    /// Assemble the typed config from coerced values.
    ///
    /// Fails only when the schema did not declare a field with the expected kind.
    pub fn compose(
        values: &BTreeMap<&'static str, SettingValue>,
        flags: FeatureFlags,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            api_base_url: url_field(values, keys::API_BASE_URL)?,
            app_env: enum_field(values, keys::APP_ENV, AppEnv::from_name)?,
            app_name: text_field(values, keys::APP_NAME)?,
            log_level: enum_field(values, keys::LOG_LEVEL, LogLevel::from_name)?,
            log_format: enum_field(values, keys::LOG_FORMAT, LogFormat::from_name)?,
            request_timeout_ms: number_field(values, keys::REQUEST_TIMEOUT_MS)?,
            max_retries: number_field(values, keys::MAX_RETRIES)?,
            analytics_endpoint: url_field(values, keys::ANALYTICS_ENDPOINT)?,
            flags,
        })
    }

    /// Project a field back into its schema representation.
    pub fn value(&self, key: &str) -> Option<SettingValue> {
        let value = match key {
            keys::API_BASE_URL => SettingValue::Url(self.api_base_url.clone()),
            keys::APP_ENV => SettingValue::Enum(self.app_env.as_str().to_string()),
            keys::APP_NAME => SettingValue::Text(self.app_name.clone()),
            keys::LOG_LEVEL => SettingValue::Enum(self.log_level.as_str().to_string()),
            keys::LOG_FORMAT => SettingValue::Enum(self.log_format.as_str().to_string()),
            keys::REQUEST_TIMEOUT_MS => {
                SettingValue::Number(i64::try_from(self.request_timeout_ms).unwrap_or(i64::MAX))
            }
            keys::MAX_RETRIES => SettingValue::Number(i64::from(self.max_retries)),
            keys::ANALYTICS_ENDPOINT => SettingValue::Url(self.analytics_endpoint.clone()),
            flag if self.flags.contains(flag) => SettingValue::Bool(self.flags.is_enabled(flag)),
            _ => return None,
        };
        Some(value)
    }

    /// Flag lookup; unknown names are disabled.
    pub fn is_feature_enabled(&self, name: &str) -> bool {
        self.flags.is_enabled(name)
    }

    /// Request timeout as a [`Duration`].
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn is_production(&self) -> bool {
        self.app_env == AppEnv::Prod
    }

    /// `User-Agent` header value, e.g. `app/0.1.0 (dev)`.
    pub fn user_agent(&self) -> String {
        format!(
            "{}/{} ({})",
            self.app_name,
            env!("CARGO_PKG_VERSION"),
            self.app_env.as_str()
        )
    }
}

fn undeclared(key: &str, expected: &str) -> ConfigurationError {
    ConfigurationError::InvalidSchema(format!("{key} is not declared as {expected}"))
}

fn url_field(values: &BTreeMap<&str, SettingValue>, key: &str) -> Result<Url, ConfigurationError> {
    match values.get(key) {
        Some(SettingValue::Url(url)) => Ok(url.clone()),
        _ => Err(undeclared(key, "a URL")),
    }
}

fn text_field(values: &BTreeMap<&str, SettingValue>, key: &str) -> Result<String, ConfigurationError> {
    match values.get(key) {
        Some(SettingValue::Text(text)) => Ok(text.clone()),
        _ => Err(undeclared(key, "a string")),
    }
}

fn number_field<T: TryFrom<i64>>(
    values: &BTreeMap<&str, SettingValue>,
    key: &str,
) -> Result<T, ConfigurationError> {
    match values.get(key) {
        Some(SettingValue::Number(n)) => {
            T::try_from(*n).map_err(|_| undeclared(key, "a number within the field's range"))
        }
        _ => Err(undeclared(key, "a number")),
    }
}

fn enum_field<T>(
    values: &BTreeMap<&str, SettingValue>,
    key: &str,
    from_name: fn(&str) -> Option<T>,
) -> Result<T, ConfigurationError> {
    match values.get(key) {
        Some(SettingValue::Enum(name)) => {
            from_name(name).ok_or_else(|| undeclared(key, "an enum with matching members"))
        }
        _ => Err(undeclared(key, "an enum")),
    }
}
