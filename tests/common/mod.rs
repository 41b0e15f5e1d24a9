//! Common test utilities for integration tests
//!
//! Provides shared fixtures used across multiple integration test files.

use appconfig::config::MapEnv;
use appconfig::keys;

/// Every key the builtin schema recognises, for clearing the process env.
#[allow(dead_code)]
pub const ALL_KEYS: &[&str] = &[
    keys::API_BASE_URL,
    keys::APP_ENV,
    keys::APP_NAME,
    keys::LOG_LEVEL,
    keys::LOG_FORMAT,
    keys::REQUEST_TIMEOUT_MS,
    keys::MAX_RETRIES,
    keys::ANALYTICS_ENDPOINT,
    keys::ENABLE_BETA,
    keys::ENABLE_DARK_MODE,
    keys::ENABLE_OFFLINE_SYNC,
];

/// Minimal environment that resolves successfully.
#[allow(dead_code)]
pub fn valid_env() -> MapEnv {
    MapEnv::new().with(keys::API_BASE_URL, "https://api.example.com")
}

/// Process-env overrides that unset every recognised key except those in `vars`.
#[allow(dead_code)]
pub fn only_vars(vars: &[(&'static str, &'static str)]) -> Vec<(&'static str, Option<&'static str>)> {
    ALL_KEYS
        .iter()
        .map(|key| {
            let value = vars
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| *value);
            (*key, value)
        })
        .collect()
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
