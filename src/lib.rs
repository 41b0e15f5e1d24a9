//! appconfig - centralized application configuration
//!
//! Resolves typed, validated settings from the process environment once per
//! process and exposes them read-only to the rest of the application.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): setting declarations, typed config, errors, ports
//! - **Infrastructure Layer** (`infrastructure`): environment sources, schema,
//!   loader, the process-wide store, and logging
//! - **CLI Layer** (`cli`): operator diagnostics
//!
//! # Example
//!
//! ```no_run
//! fn main() -> Result<(), appconfig::ConfigurationError> {
//!     let config = appconfig::config::get()?;
//!     if appconfig::config::is_feature_enabled("ENABLE_BETA") {
//!         println!("beta enabled for {}", config.api_base_url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;

pub use infrastructure::config;

// Re-export commonly used types for convenience
pub use domain::models::{
    keys, parse_bool, AppEnv, FeatureFlags, LogFormat, LogLevel, RawSetting, SettingKind,
    SettingSpec, SettingValue, TypedConfig, FALSY, TRUTHY,
};
pub use domain::ports::EnvSource;
pub use domain::{ConfigurationError, IssueKind, ParseIssue, ValidationIssue};
pub use infrastructure::config::{ConfigLoader, ConfigStore, LoadState, Resolution};
