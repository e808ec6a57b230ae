//! Rendering of daily log rows for `timeclock log show`.

use serde_json::{Map, Value};
use tabled::{builder::Builder, settings::Style};

use super::OutputFormat;
use crate::error::Result;

/// Render raw daily log rows (header first) in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_rows(rows: &[Vec<String>], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(render_plain(rows)),
        OutputFormat::Table => Ok(render_table(rows)),
        OutputFormat::Json => render_json(rows),
    }
}

fn render_plain(rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return "No data available.".to_string();
    }
    rows.iter()
        .map(|row| row.join(" | "))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_table(rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return "No data available.".to_string();
    }

    let mut builder = Builder::default();
    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::psql());
    table.to_string()
}

fn render_json(rows: &[Vec<String>]) -> Result<String> {
    let Some((header, records)) = rows.split_first() else {
        return Ok("[]".to_string());
    };

    let objects: Vec<Value> = records
        .iter()
        .map(|record| {
            let object: Map<String, Value> = header
                .iter()
                .zip(record)
                .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                .collect();
            Value::Object(object)
        })
        .collect();

    Ok(serde_json::to_string_pretty(&objects)?)
}
