//! Vendor name extraction.
//!
//! Line heuristics over the top of the document always take priority over
//! the regex fallbacks; results are never merged.

use tracing::trace;

use super::patterns::{first_capture, VENDOR_PATTERNS};
use super::FieldExtractor;

/// Substrings that mark a line as a company name.
const COMPANY_MARKERS: &[&str] = &["inc", "llc", "corp", "ltd", "company", "co"];

/// Default number of leading non-empty lines searched.
pub const DEFAULT_SCAN_LINES: usize = 5;

/// Vendor name extractor.
pub struct VendorExtractor {
    scan_lines: usize,
}

impl VendorExtractor {
    pub fn new() -> Self {
        Self {
            scan_lines: DEFAULT_SCAN_LINES,
        }
    }

    /// Set how many leading non-empty lines are searched.
    pub fn with_scan_lines(mut self, scan_lines: usize) -> Self {
        self.scan_lines = scan_lines.max(1);
        self
    }

    /// A scanned line mentioning a company marker.
    fn company_line(&self, lines: &[&str]) -> Option<String> {
        lines
            .iter()
            .filter(|l| looks_like_name(l))
            .find(|l| {
                let lower = l.to_lowercase();
                COMPANY_MARKERS.iter().any(|m| lower.contains(m))
            })
            .map(|l| l.to_string())
    }

    /// The first line, if it reads like a multi-word name.
    fn leading_line(&self, lines: &[&str]) -> Option<String> {
        lines
            .first()
            .filter(|l| looks_like_name(l) && l.split_whitespace().count() >= 2)
            .map(|l| l.to_string())
    }
}

impl Default for VendorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for VendorExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<String> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .take(self.scan_lines)
            .collect();

        self.company_line(&lines)
            .or_else(|| self.leading_line(&lines))
            .or_else(|| {
                trace!("No vendor line in header, trying labeled patterns");
                labeled_vendor(text)
            })
    }
}

fn looks_like_name(line: &str) -> bool {
    line.chars().count() > 3 && !line.starts_with(|c: char| c.is_ascii_digit())
}

fn labeled_vendor(text: &str) -> Option<String> {
    first_capture(&VENDOR_PATTERNS, text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Option<String> {
        VendorExtractor::new().extract(text)
    }

    #[test]
    fn test_company_marker_line() {
        let text = "INVOICE\n  Office Depot Inc.  \nDATE: 01/15/2024";
        assert_eq!(extract(text), Some("Office Depot Inc.".to_string()));
    }

    #[test]
    fn test_first_line_with_two_words() {
        let text = "Grand Plaza Hotel\nGuest: Business Traveler";
        assert_eq!(extract(text), Some("Grand Plaza Hotel".to_string()));
    }

    #[test]
    fn test_bill_to_fallback() {
        let text = "42 Harbor Road\nBill To: Initech Partners\nTotal $5.00";
        assert_eq!(extract(text), Some("Initech Partners".to_string()));

        // `from:` is tried before `bill to:`.
        let text = "42 Harbor Road\nBill To: Initech Partners\nFrom: Globex Partners";
        assert_eq!(extract(text), Some("Globex Partners".to_string()));
    }

    #[test]
    fn test_line_heuristic_beats_fallback() {
        let text = "Northwind Traders\nFrom: Someone Else Ltd";
        // The second line carries a company marker and is found first.
        assert_eq!(extract(text), Some("From: Someone Else Ltd".to_string()));
    }

    #[test]
    fn test_from_label_fallback() {
        let text = "12 Main Street\nFrom: Acme Supplies\nTotal $5.00";
        assert_eq!(extract(text), Some("Acme Supplies".to_string()));
    }

    #[test]
    fn test_suffix_pattern_beyond_scan_window() {
        let text = "1\n2\n3\n4\n5\nGlobex Corp\nTotal $5.00";
        assert_eq!(extract(text), Some("Globex Corp".to_string()));
    }

    #[test]
    fn test_scan_lines_is_configurable() {
        let text = "1\n2\n3\n4\n5\nGlobex Corp\nTotal $5.00";
        let extractor = VendorExtractor::new().with_scan_lines(6);
        assert_eq!(extractor.extract(text), Some("Globex Corp".to_string()));
    }

    #[test]
    fn test_not_found() {
        assert_eq!(extract("42\n$19.99"), None);
        assert_eq!(extract(""), None);
    }
}
