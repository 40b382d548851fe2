//! Rendering result tables for the terminal.

use cds_core::ResultTable;
use cds_core::models::config::OutputFormat;
use console::{measure_text_width, style};

/// Output format for printed results.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Format {
    /// Aligned plain-text table
    Table,
    /// CSV with header row
    Csv,
    /// JSON array of rows
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Table => OutputFormat::Table,
            Format::Csv => OutputFormat::Csv,
            Format::Json => OutputFormat::Json,
        }
    }
}

/// Render a table in the requested format.
pub fn render(table: &ResultTable, format: OutputFormat) -> anyhow::Result<String> {
    let output = match format {
        OutputFormat::Table => format_table_text(table),
        OutputFormat::Csv => table.to_csv()?,
        OutputFormat::Json => serde_json::to_string_pretty(table)?,
    };
    Ok(output)
}

/// Format a table as aligned columns with a header and separator line.
pub fn format_table_text(table: &ResultTable) -> String {
    let header: Vec<String> = ResultTable::columns().iter().map(|c| c.to_string()).collect();
    let rows: Vec<Vec<String>> = table.iter().map(|r| r.to_row()).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| measure_text_width(h)).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(measure_text_width(cell));
        }
    }

    let mut output = String::new();

    let header_line = format_line(&header, &widths);
    output.push_str(&style(header_line).bold().to_string());
    output.push('\n');

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    output.push_str(&format_line(&separator, &widths));
    output.push('\n');

    for row in &rows {
        output.push_str(&format_line(row, &widths));
        output.push('\n');
    }

    output
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        let padding = width.saturating_sub(measure_text_width(cell));
        line.push_str(&" ".repeat(padding));
    }
    line.trim_end().to_string()
}
