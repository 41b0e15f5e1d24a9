//! Environment sources.

use std::collections::HashMap;

use crate::domain::ports::EnvSource;

/// Reads the real process environment.
///
/// Values that are not valid Unicode are converted lossily; they then fail
/// coercion and show up as parse issues instead of vanishing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

/// In-memory environment, used to inject configuration without touching the
/// process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Empty environment: every key is unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_env_snapshot_keeps_unset_keys() {
        let env = MapEnv::new().with("LOG_LEVEL", "debug");
        let raw = env.snapshot(&["LOG_LEVEL", "APP_ENV"]);

        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].value.as_deref(), Some("debug"));
        assert_eq!(raw[1].key, "APP_ENV");
        assert_eq!(raw[1].value, None);
    }

    #[test]
    fn test_process_env_reads_variable() {
        temp_env::with_var("APPCONFIG_ENV_PROBE", Some("yes"), || {
            assert_eq!(ProcessEnv.var("APPCONFIG_ENV_PROBE").as_deref(), Some("yes"));
        });
        temp_env::with_var_unset("APPCONFIG_ENV_PROBE", || {
            assert_eq!(ProcessEnv.var("APPCONFIG_ENV_PROBE"), None);
        });
    }
}
