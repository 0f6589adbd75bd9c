//! Count report generation.
//!
//! Renders a [`CountTable`] as `complaint type,borough,count` lines.
//! Field values are written as-is; no CSV quoting is applied.

use crate::error::ReportError;
use crate::models::CountTable;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Fixed first line of every report.
pub const HEADER: &str = "complaint type,borough,count";

/// Header followed by one line per observed cell, in table order.
pub fn render_lines(table: &CountTable) -> Vec<String> {
    let mut lines = Vec::with_capacity(table.len() + 1);
    lines.push(HEADER.to_string());

    for (complaint_type, borough, count) in table.iter() {
        lines.push(format!("{},{},{}", complaint_type, borough, count));
    }

    lines
}

/// The full report text, newline-separated with no trailing newline.
pub fn render(table: &CountTable) -> String {
    render_lines(table).join("\n")
}

/// Write the report to `output`, or to stdout when `None`.
///
/// An existing file is overwritten.
pub fn write_report(table: &CountTable, output: Option<&Path>) -> Result<(), ReportError> {
    match output {
        Some(path) => {
            std::fs::write(path, render(table)).map_err(|e| ReportError::file_access(path, e))?;
            info!("Report saved to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_to(table, stdout.lock())
                .map_err(|e| ReportError::file_access("<stdout>", e))?;
        }
    }

    Ok(())
}

/// Print the report to a terminal-style stream, ending with one newline.
pub fn write_to<W: Write>(table: &CountTable, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "{}", render(table))?;
    writer.flush()
}
