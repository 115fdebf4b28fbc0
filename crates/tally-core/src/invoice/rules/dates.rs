//! Date location and normalization.

use chrono::NaiveDate;
use tracing::trace;

use super::patterns::{first_capture, DATE_PATTERNS};
use super::FieldExtractor;

/// Canonical output format.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A candidate date format and the year width it expects.
struct DateFormat {
    pattern: &'static str,
    separator: char,
    year_digits: usize,
    year_first: bool,
}

const fn format(pattern: &'static str, separator: char, year_digits: usize, year_first: bool) -> DateFormat {
    DateFormat {
        pattern,
        separator,
        year_digits,
        year_first,
    }
}

/// Tried in order; the first successful parse wins, so an ambiguous
/// `01/02/2024` reads month-first.
const DATE_FORMATS: &[DateFormat] = &[
    format("%m/%d/%Y", '/', 4, false),
    format("%m-%d-%Y", '-', 4, false),
    format("%d/%m/%Y", '/', 4, false),
    format("%d-%m-%Y", '-', 4, false),
    format("%m/%d/%y", '/', 2, false),
    format("%m-%d-%y", '-', 2, false),
    format("%d/%m/%y", '/', 2, false),
    format("%d-%m-%y", '-', 2, false),
    format("%Y/%m/%d", '/', 4, true),
    format("%Y-%m-%d", '-', 4, true),
];

impl DateFormat {
    fn parse(&self, s: &str) -> Option<NaiveDate> {
        let parts: Vec<&str> = s.split(self.separator).collect();
        if parts.len() != 3 {
            return None;
        }

        // chrono's %Y accepts short years; require the exact width instead.
        let year = if self.year_first { parts[0] } else { parts[2] };
        if year.len() != self.year_digits {
            return None;
        }

        NaiveDate::parse_from_str(s, self.pattern).ok()
    }
}

/// Locates the raw date substring in invoice text.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<String> {
        first_capture(&DATE_PATTERNS, text).map(str::to_string)
    }
}

/// Parse a date string with the first matching format.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS.iter().find_map(|f| f.parse(s))
}

/// Return `s` as `YYYY-MM-DD`, or unchanged if no format parses it.
pub fn normalize_date(s: &str) -> String {
    match parse_date(s) {
        Some(date) => date.format(ISO_DATE_FORMAT).to_string(),
        None => {
            trace!("Could not parse date {:?}, keeping raw value", s);
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_first_wins() {
        assert_eq!(normalize_date("01/15/2024"), "2024-01-15");
        assert_eq!(normalize_date("01/02/2024"), "2024-01-02");
    }

    #[test]
    fn test_day_first_when_month_invalid() {
        assert_eq!(normalize_date("15/01/2024"), "2024-01-15");
        assert_eq!(normalize_date("25-12-2023"), "2023-12-25");
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(normalize_date("01/15/24"), "2024-01-15");
        assert_eq!(normalize_date("3-4-99"), "1999-03-04");
    }

    #[test]
    fn test_iso_round_trip() {
        assert_eq!(normalize_date("2024-01-15"), "2024-01-15");
        assert_eq!(normalize_date("2024/1/5"), "2024-01-05");
    }

    #[test]
    fn test_unparseable_kept_raw() {
        assert_eq!(normalize_date("13/13/2024"), "13/13/2024");
        assert_eq!(normalize_date("1/2/202"), "1/2/202");
    }

    #[test]
    fn test_extract_labeled_date() {
        let extractor = DateExtractor::new();
        assert_eq!(
            extractor.extract("Invoice Date: 02/05/2024"),
            Some("02/05/2024".to_string())
        );
        assert_eq!(
            extractor.extract("Issued 2024-02-01 by us"),
            Some("2024-02-01".to_string())
        );
    }

    #[test]
    fn test_bare_pattern_catches_non_dates() {
        // Known limitation: any D/D/Y-shaped token is taken as a date.
        let extractor = DateExtractor::new();
        assert_eq!(
            extractor.extract("Ref 12/34/5678"),
            Some("12/34/5678".to_string())
        );
        assert_eq!(normalize_date("12/34/5678"), "12/34/5678");
    }

    #[test]
    fn test_no_date() {
        assert_eq!(DateExtractor::new().extract("Date: February 1, 2024"), None);
    }
}
