//! Process-wide configuration store.
//!
//! A [`ConfigStore`] resolves its configuration at most once and serves the
//! cached outcome afterwards. The free functions at the bottom of this module
//! front a single global store, which is the only configuration the rest of
//! the application should read.

use anyhow::anyhow;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;
use tracing::{error, info};

use super::env::ProcessEnv;
use super::loader::{ConfigLoader, Resolution};
use super::schema::Schema;
use crate::domain::errors::{ConfigurationError, ValidationIssue};
use crate::domain::models::TypedConfig;
use crate::domain::ports::EnvSource;

/// Global configuration store singleton
static GLOBAL_STORE: OnceLock<ConfigStore> = OnceLock::new();

/// Lifecycle of a store. `Ready` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LoadState {
    /// Nothing has asked for the configuration yet
    Uninitialized = 0,
    /// A resolution is in progress
    Loading = 1,
    /// Resolved; the configuration is served from cache
    Ready = 2,
    /// Resolution failed; the error is served from cache
    Failed = 3,
}

impl LoadState {
    const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Loading,
            2 => Self::Ready,
            3 => Self::Failed,
            _ => Self::Uninitialized,
        }
    }
}

/// Lazily resolved, immutable configuration
pub struct ConfigStore {
    loader: ConfigLoader,
    source: Box<dyn EnvSource>,
    state: AtomicU8,
    outcome: OnceLock<Result<Resolution, ConfigurationError>>,
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("loader", &self.loader)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl ConfigStore {
    /// Store backed by the real process environment.
    pub fn from_process_env() -> Self {
        Self::with_source(ProcessEnv)
    }

    /// Store backed by an arbitrary source, using the builtin schema.
    pub fn with_source(source: impl EnvSource + 'static) -> Self {
        Self::with_schema(Schema::builtin(), source)
    }

    /// Store with a custom schema, mainly for tests.
    pub fn with_schema(schema: Schema, source: impl EnvSource + 'static) -> Self {
        Self {
            loader: ConfigLoader::new(schema),
            source: Box::new(source),
            state: AtomicU8::new(LoadState::Uninitialized as u8),
            outcome: OnceLock::new(),
        }
    }

    /// Loader, and through it the schema, backing this store.
    pub const fn loader(&self) -> &ConfigLoader {
        &self.loader
    }

    /// Resolve the configuration, or return the cached outcome.
    ///
    /// Concurrent first callers block until the single resolution finishes
    /// and all observe the same result.
    pub fn load(&self) -> Result<&Resolution, ConfigurationError> {
        self.outcome
            .get_or_init(|| self.resolve())
            .as_ref()
            .map_err(Clone::clone)
    }

    /// The resolved configuration, loading it on first access.
    pub fn get(&self) -> Result<&TypedConfig, ConfigurationError> {
        self.load().map(|resolution| &resolution.config)
    }

    /// Flag lookup. Unknown flags and failed stores report `false`.
    pub fn is_feature_enabled(&self, name: &str) -> bool {
        self.get()
            .is_ok_and(|config| config.is_feature_enabled(name))
    }

    /// Every issue recorded by the load, fatal or not.
    pub fn diagnostics(&self) -> &[ValidationIssue] {
        match self.outcome.get_or_init(|| self.resolve()) {
            Ok(resolution) => &resolution.diagnostics,
            Err(err) => err.issues(),
        }
    }

    /// Validate a config against this store's schema.
    pub fn validate(&self, config: &TypedConfig) -> Vec<ValidationIssue> {
        self.loader.validate(config)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LoadState {
        LoadState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Forget the cached outcome so the next access loads again.
    ///
    /// Needs exclusive access, so the global store can never be reset.
    pub fn reset(&mut self) {
        self.outcome.take();
        self.state
            .store(LoadState::Uninitialized as u8, Ordering::Release);
    }

    fn resolve(&self) -> Result<Resolution, ConfigurationError> {
        self.state.store(LoadState::Loading as u8, Ordering::Release);

        let outcome = self.loader.load(self.source.as_ref());
        match &outcome {
            Ok(resolution) => {
                let config = &resolution.config;
                info!(
                    env = config.app_env.as_str(),
                    api_base_url = %config.api_base_url,
                    flags_enabled = config.flags.enabled().count(),
                    diagnostics = resolution.diagnostics.len(),
                    "Configuration resolved"
                );
                self.state.store(LoadState::Ready as u8, Ordering::Release);
            }
            Err(err) => {
                error!(error = %err, "Configuration failed to resolve");
                self.state.store(LoadState::Failed as u8, Ordering::Release);
            }
        }
        outcome
    }
}

/// The global store, created from the process environment on first use.
pub fn global() -> &'static ConfigStore {
    GLOBAL_STORE.get_or_init(ConfigStore::from_process_env)
}

/// Install the global store (call once at startup, before any access).
pub fn install(store: ConfigStore) -> anyhow::Result<()> {
    GLOBAL_STORE
        .set(store)
        .map_err(|_| anyhow!("Configuration store already initialized"))
}

/// Load the global configuration, returning diagnostics alongside it.
pub fn load() -> Result<&'static Resolution, ConfigurationError> {
    global().load()
}

/// The global configuration.
pub fn get() -> Result<&'static TypedConfig, ConfigurationError> {
    global().get()
}

/// Flag lookup against the global configuration.
pub fn is_feature_enabled(name: &str) -> bool {
    global().is_feature_enabled(name)
}

/// Validate a config against the builtin schema. Pure.
pub fn validate(config: &TypedConfig) -> Vec<ValidationIssue> {
    Schema::builtin().validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{keys, RawSetting};
    use crate::infrastructure::config::env::MapEnv;
    use std::sync::atomic::AtomicUsize;
    use std::sync::{Arc, Barrier};
    use std::thread;

    /// Counts how many times the environment is read.
    struct CountingEnv {
        inner: MapEnv,
        reads: Arc<AtomicUsize>,
    }

    impl EnvSource for CountingEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.inner.var(key)
        }

        fn snapshot(&self, keys: &[&str]) -> Vec<RawSetting> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            keys.iter()
                .map(|key| RawSetting::new(*key, self.inner.var(key)))
                .collect()
        }
    }

    fn counting_store(env: MapEnv) -> (ConfigStore, Arc<AtomicUsize>) {
        let reads = Arc::new(AtomicUsize::new(0));
        let store = ConfigStore::with_source(CountingEnv {
            inner: env,
            reads: Arc::clone(&reads),
        });
        (store, reads)
    }

    fn valid_env() -> MapEnv {
        MapEnv::new().with(keys::API_BASE_URL, "https://api.example.com")
    }

    #[test]
    fn test_get_is_lazy_and_cached() {
        let (store, reads) = counting_store(valid_env());
        assert_eq!(store.state(), LoadState::Uninitialized);
        assert_eq!(reads.load(Ordering::SeqCst), 0);

        let first = store.get().unwrap();
        let second = store.get().unwrap();

        assert!(std::ptr::eq(first, second));
        assert_eq!(reads.load(Ordering::SeqCst), 1);
        assert_eq!(store.state(), LoadState::Ready);
    }

    #[test]
    fn test_load_and_get_share_one_resolution() {
        let (store, reads) = counting_store(valid_env());

        let resolution = store.load().unwrap();
        let config = store.get().unwrap();

        assert!(std::ptr::eq(&resolution.config, config));
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_load_is_terminal() {
        let (store, reads) = counting_store(MapEnv::new());

        let first = store.get().unwrap_err();
        let second = store.load().unwrap_err();

        assert_eq!(first, second);
        assert!(first.mentions(keys::API_BASE_URL));
        assert_eq!(store.state(), LoadState::Failed);
        assert_eq!(reads.load(Ordering::SeqCst), 1);
        assert_eq!(store.diagnostics().len(), 1);
    }

    #[test]
    fn test_feature_lookup() {
        let store = ConfigStore::with_source(valid_env().with(keys::ENABLE_BETA, "YES"));

        assert!(store.is_feature_enabled(keys::ENABLE_BETA));
        assert!(!store.is_feature_enabled(keys::ENABLE_DARK_MODE));
        assert!(!store.is_feature_enabled("nonexistent-flag"));
    }

    #[test]
    fn test_feature_lookup_on_failed_store_is_false() {
        let store = ConfigStore::with_source(MapEnv::new().with(keys::ENABLE_BETA, "true"));
        assert!(!store.is_feature_enabled(keys::ENABLE_BETA));
        assert_eq!(store.state(), LoadState::Failed);
    }

    #[test]
    fn test_reset_allows_reinjection() {
        let (mut store, reads) = counting_store(valid_env());
        store.get().unwrap();

        store.reset();
        assert_eq!(store.state(), LoadState::Uninitialized);

        store.get().unwrap();
        assert_eq!(reads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_first_access_reads_once() {
        let (store, reads) = counting_store(valid_env());
        let store = Arc::new(store);
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let config = store.get().unwrap();
                    std::ptr::from_ref(config) as usize
                })
            })
            .collect();

        let addresses: Vec<usize> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_diagnostics_triggers_load() {
        let store = ConfigStore::with_source(valid_env().with(keys::MAX_RETRIES, "lots"));

        let diagnostics = store.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].key, keys::MAX_RETRIES);
        assert_eq!(store.state(), LoadState::Ready);
    }
}
