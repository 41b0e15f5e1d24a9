//! Implementation of the `appconfig check` command.

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::display::{list_table, render_list};
use crate::cli::output::{output, CommandOutput};
use crate::domain::errors::ValidationIssue;
use crate::infrastructure::config::{ConfigStore, LoadState};

#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Treat ignored overrides as failures too
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub ok: bool,
    pub issues: Vec<ValidationIssue>,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let headline = if self.ok {
            "Configuration OK".to_string()
        } else {
            "Configuration FAILED".to_string()
        };
        if self.issues.is_empty() {
            return headline;
        }

        let mut table = list_table(&["key", "kind", "fatal", "message"]);
        for issue in &self.issues {
            table.add_row(vec![
                issue.key.clone(),
                issue.kind.to_string(),
                if issue.fatal { "yes" } else { "no" }.to_string(),
                issue.message.clone(),
            ]);
        }
        format!("{headline}\n\n{}", render_list("issue", &table, self.issues.len()))
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn check(args: &CheckArgs, store: &ConfigStore) -> CheckOutput {
    let issues = store.diagnostics().to_vec();
    let loaded = store.state() == LoadState::Ready;
    CheckOutput {
        ok: loaded && !(args.strict && !issues.is_empty()),
        issues,
    }
}

pub fn execute(args: &CheckArgs, store: &ConfigStore, json_mode: bool) -> Result<()> {
    let result = check(args, store);
    output(&result, json_mode);
    store.load()?;
    if !result.ok {
        bail!("{} configuration override(s) ignored", result.issues.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::IssueKind;
    use crate::domain::models::keys;
    use crate::infrastructure::config::MapEnv;

    fn env() -> MapEnv {
        MapEnv::new().with(keys::API_BASE_URL, "https://api.example.com")
    }

    #[test]
    fn test_check_clean_configuration() {
        let store = ConfigStore::with_source(env());
        let result = check(&CheckArgs::default(), &store);
        assert!(result.ok);
        assert!(result.issues.is_empty());
        assert_eq!(result.to_human(), "Configuration OK");
    }

    #[test]
    fn test_check_reports_ignored_overrides() {
        let store = ConfigStore::with_source(env().with(keys::LOG_LEVEL, "loud"));

        let lenient = check(&CheckArgs::default(), &store);
        assert!(lenient.ok);
        assert_eq!(lenient.issues.len(), 1);
        assert_eq!(lenient.issues[0].kind, IssueKind::Parse);

        let strict = check(&CheckArgs { strict: true }, &store);
        assert!(!strict.ok);
        assert!(execute(&CheckArgs { strict: true }, &store, true).is_err());
    }

    #[test]
    fn test_check_fails_on_missing_required() {
        let store = ConfigStore::with_source(MapEnv::new().with(keys::MAX_RETRIES, "x"));

        let result = check(&CheckArgs::default(), &store);
        assert!(!result.ok);
        assert_eq!(result.issues.len(), 2);
        assert!(result.to_human().starts_with("Configuration FAILED"));

        let err = execute(&CheckArgs::default(), &store, true).unwrap_err();
        assert!(err.to_string().contains(keys::API_BASE_URL));
    }
}
