//! Implementation of the `appconfig flag` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::config::ConfigStore;

#[derive(Args, Debug)]
pub struct FlagArgs {
    /// Flag name, e.g. ENABLE_BETA
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct FlagOutput {
    pub name: String,
    pub enabled: bool,
    /// Whether the schema declares this flag at all
    pub declared: bool,
}

impl CommandOutput for FlagOutput {
    fn to_human(&self) -> String {
        let state = if self.enabled { "enabled" } else { "disabled" };
        if self.declared {
            format!("{} is {state}", self.name)
        } else {
            format!("{} is {state} (not a declared flag)", self.name)
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn lookup(name: &str, store: &ConfigStore) -> FlagOutput {
    let declared = store
        .loader()
        .schema()
        .get(name)
        .is_some_and(|spec| spec.flag);
    FlagOutput {
        name: name.to_string(),
        enabled: store.is_feature_enabled(name),
        declared,
    }
}

/// Print the flag's state. Fails when the configuration did not resolve.
pub fn execute(args: &FlagArgs, store: &ConfigStore, json_mode: bool) -> Result<()> {
    store.get()?;
    output(&lookup(&args.name, store), json_mode);
    Ok(())
}
