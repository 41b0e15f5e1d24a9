//! Implementation of the `appconfig docs` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::display::{list_table, render_list};
use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::config::{DocRow, Schema};

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct DocsOutput {
    pub rows: Vec<DocRow>,
}

impl CommandOutput for DocsOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["key", "type", "default", "required", "description"]);
        for row in &self.rows {
            let kind = if row.flag {
                format!("{} (flag)", row.kind)
            } else {
                row.kind.clone()
            };
            table.add_row(vec![
                row.key.to_string(),
                kind,
                row.default.unwrap_or("-").to_string(),
                if row.required { "yes" } else { "no" }.to_string(),
                row.description.to_string(),
            ]);
        }
        render_list("setting", &table, self.rows.len())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(schema: &Schema, json_mode: bool) -> Result<()> {
    schema.check()?;
    output(&DocsOutput { rows: schema.doc_rows() }, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docs_json_is_a_row_array() {
        let docs = DocsOutput {
            rows: Schema::builtin().doc_rows(),
        };
        let json = docs.to_json();
        let rows = json.as_array().unwrap();

        assert_eq!(rows[0]["key"], "API_BASE_URL");
        assert_eq!(rows[0]["required"], true);
        assert!(rows[0]["default"].is_null());
        assert_eq!(rows[0]["type"], "http(s) URL");
    }

    #[test]
    fn test_docs_human_marks_flags() {
        let docs = DocsOutput {
            rows: Schema::builtin().doc_rows(),
        };
        assert!(docs.to_human().contains("boolean (flag)"));
    }
}
