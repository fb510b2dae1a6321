//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use vigil_domain::StoreValue;
use vigil_watcher::{AlertKind, WatcherMetrics};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Whether output is colorized.
    pub fn color_enabled(&self) -> bool {
        self.color_enabled
    }

    /// Format a store listing.
    pub fn format_entries(&self, entries: &[(String, StoreValue)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_entries_json(entries),
            OutputFormat::Table => Ok(self.format_entries_table(entries)),
        }
    }

    /// Format a single value read with `get`.
    pub fn format_value(&self, key: &str, value: &StoreValue) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&entry_json(key, value))?),
            OutputFormat::Table => Ok(value.to_string()),
        }
    }

    fn format_entries_json(&self, entries: &[(String, StoreValue)]) -> Result<String> {
        let json_entries: Vec<Value> = entries
            .iter()
            .map(|(key, value)| entry_json(key, value))
            .collect();

        Ok(serde_json::to_string_pretty(&json_entries)?)
    }

    fn format_entries_table(&self, entries: &[(String, StoreValue)]) -> String {
        if entries.is_empty() {
            return self.colorize("Store is empty.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Key", "Type", "Value"]);

        for (key, value) in entries {
            builder.push_record([
                key.clone(),
                value.kind().to_string(),
                value.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format watcher metrics.
    pub fn format_metrics(&self, metrics: &WatcherMetrics, len: usize, capacity: usize) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = json!({
                    "entries": len,
                    "capacity": capacity,
                    "sweeps": metrics.sweep_count,
                    "aborted_sweeps": metrics.aborted_sweeps,
                    "entries_visited": metrics.entries_visited,
                    "counter_increments": metrics.counter_increments,
                    "callback_failures": metrics.callback_failures,
                    "alerts": {
                        "integer": metrics.alerts_of(AlertKind::Integer),
                        "string": metrics.alerts_of(AlertKind::String),
                        "color": metrics.alerts_of(AlertKind::Color),
                    },
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => Ok(format!(
                "Entries: {}/{}\n{}",
                len,
                capacity,
                metrics.summary()
            )),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// JSON representation of one entry; colors render as hex strings.
fn entry_json(key: &str, value: &StoreValue) -> Value {
    let payload = match value {
        StoreValue::Integer(v) => json!(v),
        StoreValue::String(v) => json!(v),
        StoreValue::Color(c) => json!(c.to_string()),
        StoreValue::IntegerArray(values) => json!(values),
        StoreValue::ColorArray(colors) => {
            json!(colors.iter().map(|c| c.to_string()).collect::<Vec<_>>())
        }
    };

    json!({
        "key": key,
        "type": value.kind().as_str(),
        "value": payload,
    })
}
