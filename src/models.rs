//! Data models for the complaint report.
//!
//! This module contains the row view over a CSV record, the positional
//! column layout it is read through, and the two-level count table the
//! scan produces.

use crate::error::ReportError;
use csv::StringRecord;
use std::collections::BTreeMap;

/// Positions of the consumed columns, zero-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Column holding the creation date, with an optional time suffix.
    pub creation_date: usize,
    /// Column holding the complaint type.
    pub complaint_type: usize,
    /// Column holding the borough.
    pub borough: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            creation_date: 1,
            complaint_type: 5,
            borough: 23,
        }
    }
}

impl From<&crate::config::ColumnsConfig> for ColumnLayout {
    fn from(config: &crate::config::ColumnsConfig) -> Self {
        Self {
            creation_date: config.creation_date,
            complaint_type: config.complaint_type,
            borough: config.borough,
        }
    }
}

impl ColumnLayout {
    /// Minimum number of fields a row needs for every accessor to succeed.
    pub fn required_columns(&self) -> usize {
        self.creation_date
            .max(self.complaint_type)
            .max(self.borough)
            + 1
    }
}

/// A single input record viewed through a [`ColumnLayout`].
#[derive(Debug, Clone, Copy)]
pub struct ComplaintRow<'a> {
    creation_date: &'a str,
    complaint_type: &'a str,
    borough: &'a str,
}

impl<'a> ComplaintRow<'a> {
    /// Borrow the consumed fields out of `record`.
    ///
    /// `line` is the 1-indexed record number used in the error.
    pub fn from_record(
        record: &'a StringRecord,
        line: u64,
        layout: &ColumnLayout,
    ) -> Result<Self, ReportError> {
        let field = move |index: usize| {
            record.get(index).ok_or_else(|| ReportError::MalformedRow {
                line,
                found: record.len(),
                required: layout.required_columns(),
            })
        };

        Ok(Self {
            creation_date: field(layout.creation_date)?,
            complaint_type: field(layout.complaint_type)?,
            borough: field(layout.borough)?,
        })
    }

    pub fn creation_date(&self) -> &'a str {
        self.creation_date
    }

    pub fn complaint_type(&self) -> &'a str {
        self.complaint_type
    }

    pub fn borough(&self) -> &'a str {
        self.borough
    }
}

/// Counts keyed by complaint type, then borough.
///
/// Both levels are ordered, so iteration is already in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountTable {
    counts: BTreeMap<String, BTreeMap<String, u64>>,
}

impl CountTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one to the `(complaint_type, borough)` cell.
    pub fn increment(&mut self, complaint_type: &str, borough: &str) {
        *self
            .counts
            .entry(complaint_type.to_string())
            .or_default()
            .entry(borough.to_string())
            .or_default() += 1;
    }

    /// Count for a cell; cells never incremented are zero.
    #[allow(dead_code)] // Point lookups are only needed by tests so far
    pub fn get(&self, complaint_type: &str, borough: &str) -> u64 {
        self.counts
            .get(complaint_type)
            .and_then(|boroughs| boroughs.get(borough))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of every cell.
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .flat_map(|boroughs| boroughs.values())
            .sum()
    }

    /// Number of observed `(complaint_type, borough)` pairs.
    pub fn len(&self) -> usize {
        self.counts.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Cells sorted by complaint type, then borough.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, u64)> + '_ {
        self.counts.iter().flat_map(|(complaint_type, boroughs)| {
            boroughs
                .iter()
                .map(move |(borough, count)| (complaint_type.as_str(), borough.as_str(), *count))
        })
    }
}

/// Row counters collected during a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Records read from the input.
    pub rows_read: u64,
    /// Records whose creation date fell inside the range.
    pub rows_matched: u64,
}
