//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use bondscribe_domain::{BondField, BondRecord};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

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

    /// Format extracted records.
    pub fn format_records(&self, records: &[BondRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Table => Ok(self.format_records_table(records)),
        }
    }

    /// Format records as one Field/Value table each.
    fn format_records_table(&self, records: &[BondRecord]) -> String {
        if records.is_empty() {
            return self.colorize("No records found.", "yellow");
        }

        records
            .iter()
            .map(|record| {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                for field in BondField::ALL {
                    let value = record
                        .display_value(field)
                        .unwrap_or_else(|| "null".to_string());
                    builder.push_record([field.key().to_string(), value]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                table.to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a classification result.
    pub fn classification(&self, label: Option<&str>) -> String {
        match label {
            Some(label) => format!("Classification: {}", self.colorize(label, "cyan")),
            None => self.colorize("Classification: None", "yellow"),
        }
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
