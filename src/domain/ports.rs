//! Domain ports (interfaces) for the configuration core.

use super::models::RawSetting;

/// Source of raw environment values.
///
/// The only sanctioned way to read the process environment. Implementations
/// must be shareable across threads because the store lives in a static.
pub trait EnvSource: Send + Sync {
    /// Look up a single key; `None` when unset.
    fn var(&self, key: &str) -> Option<String>;

    /// Snapshot the given keys in one pass.
    fn snapshot(&self, keys: &[&str]) -> Vec<RawSetting> {
        keys.iter()
            .map(|key| RawSetting::new(*key, self.var(key)))
            .collect()
    }
}
