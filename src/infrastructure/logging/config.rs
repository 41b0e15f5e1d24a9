use crate::domain::models::{LogFormat, LogLevel, TypedConfig};

/// Logging configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    /// Minimum level emitted
    pub level: LogLevel,

    /// Output format (pretty, json)
    pub format: LogFormat,

    /// Include file and line in each event
    pub with_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            with_location: false,
        }
    }
}

impl From<&TypedConfig> for LogConfig {
    fn from(config: &TypedConfig) -> Self {
        Self {
            level: config.log_level,
            format: config.log_format,
            with_location: !config.is_production(),
        }
    }
}
