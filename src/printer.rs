//! Human-readable rendering of tables.
use crate::table::Table;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::{self, Write};

pub const EMPTY_MESSAGE: &str = "No data to display";

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Numbered listing under an underlined title
    #[default]
    Text,
    /// One JSON object per table
    Json,
}

/// Render `table` as a titled listing.
///
/// ```text
///
/// Title:
/// -----
///   1: a, b, c
/// ```
pub fn render_table(table: &Table, title: &str) -> String {
    let mut lines = vec![
        String::new(),
        format!("{title}:"),
        "-".repeat(title.chars().count()),
    ];

    if table.is_empty() {
        lines.push(EMPTY_MESSAGE.to_string());
    } else {
        lines.extend(
            table
                .iter()
                .enumerate()
                .map(|(i, row)| format!("{:>3}: {}", i + 1, row.join(", "))),
        );
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Writes tables to an output stream in the configured format
#[derive(Debug, Clone, Copy, Default)]
pub struct TablePrinter {
    format: OutputFormat,
}

impl TablePrinter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn print<W: Write>(&self, out: &mut W, table: &Table, title: &str) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => out.write_all(render_table(table, title).as_bytes()),
            OutputFormat::Json => {
                let value = json!({
                    "title": title,
                    "row_count": table.len(),
                    "rows": table,
                });
                serde_json::to_writer(&mut *out, &value)?;
                writeln!(out)
            }
        }
    }
}
