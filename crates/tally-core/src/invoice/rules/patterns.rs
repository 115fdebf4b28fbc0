//! Ordered regex pattern families for invoice field extraction.
//!
//! Each family is a priority list: the first pattern that matches wins, and
//! later entries are broader fallbacks. Do not reorder.

use lazy_static::lazy_static;
use regex::Regex;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

lazy_static! {
    // Invoice number
    pub static ref INVOICE_NUMBER_PATTERNS: Vec<Regex> = compile(&[
        r"(?i)invoice\s*(?:number|no|#)?\s*:?\s*([A-Z0-9\-]+)",
        r"(?i)inv\s*(?:number|no|#)?\s*:?\s*([A-Z0-9\-]+)",
        r"(?i)#\s*([A-Z0-9\-]+)",
        r"(?i)invoice\s+([A-Z0-9\-]+)",
    ]);

    // Dates: labeled first, then bare day/month/year and year/month/day tokens.
    // The bare patterns also catch other slash- or dash-separated numbers.
    pub static ref DATE_PATTERNS: Vec<Regex> = compile(&[
        r"(?i)date\s*:?\s*(\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4})",
        r"(?i)invoice\s*date\s*:?\s*(\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4})",
        r"\b(\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4})\b",
        r"\b(\d{4}[/\-]\d{1,2}[/\-]\d{1,2})\b",
    ]);

    // Totals
    pub static ref TOTAL_PATTERNS: Vec<Regex> = compile(&[
        r"(?i)\btotal\s*:?\s*\$?([0-9,]+\.?\d{0,2})",
        r"(?i)\bamount\s*due\s*:?\s*\$?([0-9,]+\.?\d{0,2})",
        r"(?i)\bgrand\s*total\s*:?\s*\$?([0-9,]+\.?\d{0,2})",
        r"(?i)\bbalance\s*due\s*:?\s*\$?([0-9,]+\.?\d{0,2})",
    ]);

    // Tax
    pub static ref TAX_PATTERNS: Vec<Regex> = compile(&[
        r"(?i)\btax\s*:?\s*\$?([0-9,]+\.?\d{0,2})",
        r"(?i)\bvat\s*:?\s*\$?([0-9,]+\.?\d{0,2})",
        r"(?i)\bsales\s*tax\s*:?\s*\$?([0-9,]+\.?\d{0,2})",
    ]);

    // Any currency-prefixed amount
    pub static ref CURRENCY_AMOUNT: Regex = Regex::new(
        r"\$([0-9,]+\.?\d{0,2})"
    ).unwrap();

    // Vendor fallbacks, used only when the line heuristics find nothing
    pub static ref VENDOR_PATTERNS: Vec<Regex> = compile(&[
        r"(?m)^\s*([A-Z][a-zA-Z &,.]+(?i:inc|llc|corp|ltd|company))",
        r"(?i)\bfrom\s*:?\s*([A-Z][a-zA-Z &,.]+)",
        r"(?i)\bbill\s*to\s*:?\s*([A-Z][a-zA-Z &,.]+)",
    ]);

    // Line items
    pub static ref NUMERIC_TOKEN: Regex = Regex::new(
        r"\$?([0-9][0-9,]*\.?\d{0,2})"
    ).unwrap();

    pub static ref QUANTITY_MARKER: Regex = Regex::new(
        r"(?i)\b(\d+)\s*x\b"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    // Confidence
    pub static ref DIGIT_RUN: Regex = Regex::new(r"[0-9]+").unwrap();
}

/// First capture group of the first pattern in `patterns` that matches.
pub fn first_capture<'t>(patterns: &[Regex], text: &'t str) -> Option<&'t str> {
    patterns
        .iter()
        .find_map(|p| p.captures(text).and_then(|c| c.get(1)))
        .map(|m| m.as_str())
}

/// Like [`first_capture`], but a pattern only wins if its capture also
/// parses; otherwise the next pattern is tried.
pub fn first_parsed<T>(
    patterns: &[Regex],
    text: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    patterns
        .iter()
        .filter_map(|p| p.captures(text).and_then(|c| c.get(1)))
        .find_map(|m| parse(m.as_str()))
}
