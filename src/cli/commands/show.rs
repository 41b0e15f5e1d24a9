//! Implementation of the `appconfig show` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::display::{list_table, render_list};
use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::TypedConfig;
use crate::infrastructure::config::{ConfigStore, Resolution};

#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    /// Only list feature flags
    #[arg(long)]
    pub flags: bool,
}

#[derive(Debug, Serialize)]
pub struct SettingRow {
    pub key: &'static str,
    pub value: String,
    pub source: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub settings: Vec<SettingRow>,
    pub user_agent: String,
    pub diagnostics: usize,
    #[serde(skip)]
    pub config: TypedConfig,
}

impl ShowOutput {
    pub fn from_resolution(store: &ConfigStore, resolution: &Resolution, flags_only: bool) -> Self {
        let config = &resolution.config;
        let settings = store
            .loader()
            .schema()
            .specs()
            .iter()
            .filter(|spec| !flags_only || spec.flag)
            .filter_map(|spec| {
                let value = config.value(spec.key)?;
                Some(SettingRow {
                    key: spec.key,
                    value: value.to_string(),
                    source: resolution
                        .source_of(spec.key)
                        .map_or("unknown", |source| source.as_str()),
                })
            })
            .collect();

        Self {
            settings,
            user_agent: config.user_agent(),
            diagnostics: resolution.diagnostics.len(),
            config: config.clone(),
        }
    }
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["key", "value", "source"]);
        for row in &self.settings {
            table.add_row(vec![row.key.to_string(), truncate(&row.value, 60), row.source.to_string()]);
        }

        let mut lines = vec![render_list("setting", &table, self.settings.len())];
        lines.push(format!("\nUser agent: {}", self.user_agent));
        if self.diagnostics > 0 {
            lines.push(format!(
                "{} override(s) ignored; run `appconfig check` for details",
                self.diagnostics
            ));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "settings": self.settings,
            "user_agent": self.user_agent,
            "diagnostics": self.diagnostics,
            "config": self.config,
        })
    }
}

pub fn execute(args: &ShowArgs, store: &ConfigStore, json_mode: bool) -> Result<()> {
    let resolution = store.load()?;
    let output_data = ShowOutput::from_resolution(store, resolution, args.flags);
    output(&output_data, json_mode);
    Ok(())
}
