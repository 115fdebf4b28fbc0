//! Line item extraction.
//!
//! This is a lossy heuristic: every body line carrying a number becomes a
//! candidate item, and lines that do not fit are dropped silently.

use rust_decimal::Decimal;

use crate::models::invoice::LineItem;

use super::amounts::parse_amount;
use super::patterns::{NUMERIC_TOKEN, QUANTITY_MARKER, WHITESPACE_RUN};

/// Lines containing any of these are treated as header/summary lines.
const HEADER_KEYWORDS: &[&str] = &["invoice", "bill to", "ship to", "date", "total"];

/// Descriptions must be longer than this after cleanup.
const MIN_DESCRIPTION_LEN: usize = 2;

/// Line item parser.
pub struct LineItemParser;

impl LineItemParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse every candidate line item in `text`, in order.
    pub fn parse(&self, text: &str) -> Vec<LineItem> {
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .filter(|l| !is_header_line(l))
            .filter_map(parse_line)
            .collect()
    }
}

impl Default for LineItemParser {
    fn default() -> Self {
        Self::new()
    }
}

fn is_header_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    HEADER_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Parse one body line into an item.
///
/// The amount is the first numeric token on the line, and the description is
/// the line with that token removed.
pub fn parse_line(line: &str) -> Option<LineItem> {
    let token = NUMERIC_TOKEN.find(line)?;

    let amount = parse_amount(token.as_str())?;

    let remainder = format!("{} {}", &line[..token.start()], &line[token.end()..]);
    let description = WHITESPACE_RUN
        .replace_all(&remainder, " ")
        .trim()
        .trim_end_matches(|c: char| matches!(c, ':' | '-' | '=' | '@'))
        .trim()
        .to_string();

    if description.chars().count() <= MIN_DESCRIPTION_LEN {
        return None;
    }

    let quantity = QUANTITY_MARKER
        .captures(&description)
        .and_then(|c| c[1].parse::<u32>().ok())
        .unwrap_or(1);

    Some(LineItem::new(description, amount, quantity))
}

/// Sum of all line amounts, saturating at `Decimal::MAX`.
pub fn items_total(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |acc, i| acc.saturating_add(i.amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_simple_item() {
        let item = parse_line("Stapler Heavy Duty $45.98").unwrap();
        assert_eq!(item.description, "Stapler Heavy Duty");
        assert_eq!(item.amount, dec("45.98"));
        assert_eq!(item.quantity, 1);
        assert_eq!(item.unit_price, dec("45.98"));
    }

    #[test]
    fn test_first_number_is_the_amount() {
        let item = parse_line("Widget 2 pack 12.00").unwrap();
        assert_eq!(item.amount, dec("2"));
        assert_eq!(item.description, "Widget pack 12.00");

        let item = parse_line("HP Printer Paper A4 $89.95").unwrap();
        assert_eq!(item.amount, dec("4"));
        assert_eq!(item.description, "HP Printer Paper A $89.95");
    }

    #[test]
    fn test_quantity_marker() {
        let item = parse_line("Printer Paper $89.95 (5 x ream)").unwrap();
        assert_eq!(item.amount, dec("89.95"));
        assert_eq!(item.quantity, 5);
        assert_eq!(item.unit_price, dec("17.99"));
    }

    #[test]
    fn test_trailing_separator_stripped() {
        let item = parse_line("HVAC System Maintenance - $200.00").unwrap();
        assert_eq!(item.description, "HVAC System Maintenance");
        assert_eq!(item.amount, dec("200.00"));
    }

    #[test]
    fn test_short_description_dropped() {
        assert!(parse_line("A $5.00").is_none());
        assert!(parse_line("$5.00").is_none());
        assert!(parse_line("No numbers here").is_none());
    }

    #[test]
    fn test_header_lines_skipped() {
        let text = "INVOICE: OS-2024-001\nDATE: 01/15/2024\nStapler Heavy Duty $45.98\nSubtotal: $226.02\nTOTAL: $245.67";
        let items = LineItemParser::new().parse(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Stapler Heavy Duty");
        assert_eq!(items_total(&items), dec("45.98"));
    }

    #[test]
    fn test_unit_price_times_quantity() {
        let text = "3 x Widgets $100.00\n7x Bolts $1.00\nCable $12.34";
        for item in LineItemParser::new().parse(text) {
            assert!(item.quantity >= 1);
            let diff = (item.unit_price * Decimal::from(item.quantity) - item.amount).abs();
            assert!(diff < dec("0.0001"), "{:?}", item);
        }
    }
}
