//! Date bound parsing and range filtering.
//!
//! Bounds and creation dates share one strict `MM/DD/YYYY` rule:
//! zero-padded month and day, four-digit year, `/` separators.

use crate::error::ReportError;
use chrono::NaiveDate;
use std::fmt;

const CHRONO_FORMAT: &str = "%m/%d/%Y";

/// A calendar date parsed from user input or a row.
pub type DateBound = NaiveDate;

/// Parse a strict `MM/DD/YYYY` date.
pub fn parse_date(value: &str) -> Result<DateBound, ReportError> {
    if !has_date_shape(value) {
        return Err(ReportError::date_format(value));
    }

    NaiveDate::parse_from_str(value, CHRONO_FORMAT).map_err(|_| ReportError::date_format(value))
}

/// chrono accepts unpadded fields, so the layout is checked byte by byte first.
fn has_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'/',
            _ => b.is_ascii_digit(),
        })
}

/// Returns the date portion of a creation-date field, dropping any time-of-day.
pub fn date_part(field: &str) -> &str {
    field.split_whitespace().next().unwrap_or("")
}

/// Inclusive date range. `start <= end` is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateBound,
    pub end: DateBound,
}

impl DateRange {
    pub fn new(start: DateBound, end: DateBound) -> Self {
        Self { start, end }
    }

    /// Parse both bounds, failing on the first malformed one.
    pub fn parse(start: &str, end: &str) -> Result<Self, ReportError> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Ok(Self::new(start, end))
    }

    pub fn contains(&self, date: DateBound) -> bool {
        self.start <= date && date <= self.end
    }

    /// A reversed range matches no date at all.
    pub fn is_reversed(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format(CHRONO_FORMAT),
            self.end.format(CHRONO_FORMAT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_valid_date() {
        assert_eq!(parse_date("01/15/2020").unwrap(), ymd(2020, 1, 15));
        assert_eq!(parse_date("12/31/1999").unwrap(), ymd(1999, 12, 31));
        assert_eq!(parse_date("02/29/2020").unwrap(), ymd(2020, 2, 29));
    }

    #[test]
    fn test_parse_rejects_other_layouts() {
        for bad in [
            "2020-01-01",
            "1/15/2020",
            "01/5/2020",
            "01/15/20",
            "01-15-2020",
            "01/15/2020 ",
            " 01/15/2020",
            "01/15/2020x",
            "",
        ] {
            let err = parse_date(bad).unwrap_err();
            assert!(
                matches!(err, ReportError::DateFormat { ref value, .. } if value == bad),
                "expected DateFormat for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert!(parse_date("13/01/2020").is_err());
        assert!(parse_date("00/10/2020").is_err());
        assert!(parse_date("02/30/2020").is_err());
        assert!(parse_date("02/29/2019").is_err());
    }

    #[test]
    fn test_date_part_strips_time() {
        assert_eq!(date_part("01/15/2020 14:32:00"), "01/15/2020");
        assert_eq!(date_part("01/15/2020 02:10:00 PM"), "01/15/2020");
        assert_eq!(date_part("01/15/2020"), "01/15/2020");
        assert_eq!(date_part("01/15/2020\t14:32"), "01/15/2020");
        assert_eq!(date_part("   "), "");
        assert_eq!(date_part(""), "");
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = DateRange::parse("01/01/2020", "01/31/2020").unwrap();
        assert!(range.contains(ymd(2020, 1, 1)));
        assert!(range.contains(ymd(2020, 1, 31)));
        assert!(range.contains(ymd(2020, 1, 15)));
        assert!(!range.contains(ymd(2019, 12, 31)));
        assert!(!range.contains(ymd(2020, 2, 1)));
    }

    #[test]
    fn test_reversed_range_matches_nothing() {
        let range = DateRange::parse("02/01/2020", "01/01/2020").unwrap();
        assert!(range.is_reversed());
        assert!(!range.contains(ymd(2020, 1, 1)));
        assert!(!range.contains(ymd(2020, 1, 15)));
        assert!(!range.contains(ymd(2020, 2, 1)));
    }

    #[test]
    fn test_range_parse_reports_offending_bound() {
        let err = DateRange::parse("01/01/2020", "2020-02-01").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid date: 2020-02-01. Date format should be MM/DD/YYYY"
        );
    }

    #[test]
    fn test_range_display() {
        let range = DateRange::parse("01/01/2020", "03/05/2020").unwrap();
        assert_eq!(range.to_string(), "01/01/2020 to 03/05/2020");
    }
}
