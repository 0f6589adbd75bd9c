//! Complaint filtering and aggregation.
//!
//! A single pass over the input: each record's creation date is parsed,
//! checked against the range, and counted under its complaint type and
//! borough. Any bad row aborts the whole scan.

use crate::dates::{date_part, parse_date, DateRange};
use crate::error::ReportError;
use crate::models::{ColumnLayout, ComplaintRow, CountTable, ScanStats};
use anyhow::{Context, Result};
use csv::StringRecord;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// Count in-range complaints read from `reader`.
///
/// Every record is data, including a header line if one is present.
pub fn aggregate<R: Read>(
    reader: R,
    range: &DateRange,
    layout: &ColumnLayout,
) -> Result<(CountTable, ScanStats), ReportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(LineBreakTracker::new(reader));

    let mut table = CountTable::new();
    let mut stats = ScanStats::default();
    let mut record = StringRecord::new();

    loop {
        let start = rdr.position().byte();
        let more = rdr.read_record(&mut record)?;

        // The csv reader skips empty lines, but each one is still a row
        // with no columns.
        if rdr.get_mut().empty_line_at(start) {
            return Err(ReportError::MalformedRow {
                line: stats.rows_read + 1,
                found: 0,
                required: layout.required_columns(),
            });
        }
        if !more {
            break;
        }

        stats.rows_read += 1;

        let row = ComplaintRow::from_record(&record, stats.rows_read, layout)?;
        let complaint_date = parse_date(date_part(row.creation_date()))?;

        if range.contains(complaint_date) {
            stats.rows_matched += 1;
            table.increment(row.complaint_type(), row.borough());
        }
    }

    Ok((table, stats))
}

/// Reader adapter that remembers where empty lines start.
///
/// Records the offset of every line break that directly follows another
/// line break (or starts the input), except the `\n` of a `\r\n` pair.
/// Offsets inside quoted fields are recorded too; they are never at a
/// record boundary, so [`LineBreakTracker::empty_line_at`] skips past them.
struct LineBreakTracker<R> {
    inner: R,
    offset: u64,
    prev: Option<u8>,
    empty_lines: VecDeque<u64>,
}

impl<R> LineBreakTracker<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            prev: None,
            empty_lines: VecDeque::new(),
        }
    }

    /// Whether an empty line begins where a read starting at byte `start`
    /// went looking for its record.
    ///
    /// After a `\r\n` record the first byte is the leftover `\n`, so the
    /// line after it starts one byte later.
    fn empty_line_at(&mut self, start: u64) -> bool {
        while matches!(self.empty_lines.front(), Some(&offset) if offset < start) {
            self.empty_lines.pop_front();
        }
        matches!(self.empty_lines.front(), Some(&offset) if offset <= start + 1)
    }
}

fn is_line_break(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

impl<R: Read> Read for LineBreakTracker<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;

        for &byte in &buf[..n] {
            if is_line_break(byte) {
                let starts_line = match self.prev {
                    None => true,
                    Some(b'\r') => byte != b'\n',
                    Some(prev) => is_line_break(prev),
                };
                if starts_line {
                    self.empty_lines.push_back(self.offset);
                }
            }
            self.prev = Some(byte);
            self.offset += 1;
        }

        Ok(n)
    }
}

/// Parse the bounds, then scan the CSV file at `path`.
///
/// The bounds are checked before the file is opened.
pub fn aggregate_file(
    path: &Path,
    start_date: &str,
    end_date: &str,
    layout: &ColumnLayout,
) -> Result<CountTable> {
    let range = DateRange::parse(start_date, end_date)?;
    debug!("Date range: {}", range);

    if range.is_reversed() {
        warn!(
            "Start date {} is after end date {}; no rows can match",
            start_date, end_date
        );
    }

    let file = File::open(path).map_err(|e| ReportError::file_access(path, e))?;
    info!("Reading complaints from {}", path.display());

    let (table, stats) = aggregate(BufReader::new(file), &range, layout)
        .with_context(|| format!("Failed to aggregate {}", path.display()))?;

    info!(
        "Scanned {} rows, {} in range, {} type/borough pairs",
        stats.rows_read,
        table.total(),
        table.len()
    );

    debug_assert_eq!(stats.rows_matched, table.total());
    Ok(table)
}
