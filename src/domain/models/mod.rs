pub mod config;
pub mod setting;

pub use config::{keys, AppEnv, FeatureFlags, LogFormat, LogLevel, TypedConfig};
pub use setting::{parse_bool, RawSetting, SettingKind, SettingSpec, SettingValue, FALSY, TRUTHY};
