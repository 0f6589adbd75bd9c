//! Error types for the complaint report pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// The only date layout accepted for bounds and creation dates.
pub const DATE_FORMAT_DESCRIPTION: &str = "MM/DD/YYYY";

/// Failures that abort a report run.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A date bound or a row's creation date is not `MM/DD/YYYY`.
    #[error("Invalid date: {value}. Date format should be {expected}")]
    DateFormat {
        value: String,
        expected: &'static str,
    },

    /// The input could not be opened or the output could not be written.
    #[error("Cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row is too short for the positional column layout.
    #[error("Row {line} has {found} columns, at least {required} are required")]
    MalformedRow {
        line: u64,
        found: usize,
        required: usize,
    },

    /// The CSV reader failed (bad quoting, invalid UTF-8, I/O mid-scan).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ReportError {
    pub(crate) fn date_format(value: &str) -> Self {
        ReportError::DateFormat {
            value: value.to_string(),
            expected: DATE_FORMAT_DESCRIPTION,
        }
    }

    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::FileAccess {
            path: path.into(),
            source,
        }
    }
}
