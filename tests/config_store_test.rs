// Integration tests for resolving configuration through ConfigStore.

mod common;

use appconfig::config::{ConfigStore, MapEnv, ProcessEnv};
use appconfig::{keys, ConfigurationError, IssueKind, LoadState, LogLevel};

#[test]
fn test_process_env_resolution() {
    common::setup_test_logging();
    let vars = common::only_vars(&[
        (keys::API_BASE_URL, "https://api.example.com"),
        (keys::ENABLE_BETA, "YES"),
        (keys::APP_ENV, "prod"),
    ]);

    temp_env::with_vars(vars, || {
        let store = ConfigStore::with_source(ProcessEnv);
        let config = store.get().expect("config should resolve");

        assert!(store.is_feature_enabled(keys::ENABLE_BETA));
        assert!(!store.is_feature_enabled("nonexistent-flag"));
        assert!(config.is_production());
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(store.diagnostics().is_empty());
    });
}

#[test]
fn test_environment_is_not_reread_after_load() {
    let vars = common::only_vars(&[(keys::API_BASE_URL, "https://api.example.com")]);

    temp_env::with_vars(vars, || {
        let store = ConfigStore::with_source(ProcessEnv);
        let first = store.get().unwrap();

        // Restored to unset by temp_env once the closure returns.
        std::env::set_var(keys::LOG_LEVEL, "error");
        let second = store.get().unwrap();

        assert!(std::ptr::eq(first, second));
        assert_eq!(second.log_level, LogLevel::Info);
    });
}

#[test]
fn test_unset_required_key_fails_fatally() {
    let vars = common::only_vars(&[(keys::LOG_LEVEL, "debug")]);

    temp_env::with_vars(vars, || {
        let store = ConfigStore::with_source(ProcessEnv);
        let err = store.get().unwrap_err();

        assert!(matches!(err, ConfigurationError::Unresolved { .. }));
        assert!(err.mentions(keys::API_BASE_URL));
        assert_eq!(store.state(), LoadState::Failed);
    });
}

#[test]
fn test_invalid_required_url_names_the_key() {
    let store = ConfigStore::with_source(MapEnv::new().with(keys::API_BASE_URL, "not-a-url"));
    let err = store.load().unwrap_err();

    assert!(err.to_string().contains("API_BASE_URL"));
    assert_eq!(err.issues()[0].kind, IssueKind::Parse);
}

#[test]
fn test_store_validate_counts_independent_violations() {
    let store = ConfigStore::with_source(common::valid_env());
    let mut config = store.get().unwrap().clone();
    assert!(store.validate(&config).is_empty());

    config.app_name = "   ".to_string();
    config.max_retries = 11;
    config.analytics_endpoint = "ftp://collector.example.com".parse().unwrap();

    let issues = store.validate(&config);
    assert_eq!(issues.len(), 3);
    assert!(issues.iter().all(|issue| !issue.fatal));
}

#[test]
fn test_free_validate_matches_store_validate() {
    let store = ConfigStore::with_source(common::valid_env());
    let mut config = store.get().unwrap().clone();
    config.request_timeout_ms = 0;

    let issues = appconfig::config::validate(&config);
    assert_eq!(issues, store.validate(&config));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].key, keys::REQUEST_TIMEOUT_MS);
}
