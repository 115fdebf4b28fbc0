//! Total and tax amount extraction.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

use super::patterns::{first_parsed, CURRENCY_AMOUNT, TAX_PATTERNS, TOTAL_PATTERNS};
use super::{first_match, FieldExtractor, Strategy};

/// Invoice total extractor.
///
/// Labeled totals win; otherwise the largest currency amount in the text is
/// taken as the total.
pub struct TotalExtractor;

impl TotalExtractor {
    const STRATEGIES: &'static [Strategy<Decimal>] = &[labeled_total, largest_currency_amount];

    pub fn new() -> Self {
        Self
    }
}

impl Default for TotalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TotalExtractor {
    type Output = Decimal;

    fn extract(&self, text: &str) -> Option<Decimal> {
        first_match(Self::STRATEGIES, text)
    }
}

/// Tax amount extractor. Labeled amounts only, no fallback scan.
pub struct TaxExtractor;

impl TaxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TaxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TaxExtractor {
    type Output = Decimal;

    fn extract(&self, text: &str) -> Option<Decimal> {
        first_parsed(&TAX_PATTERNS, text, parse_amount)
    }
}

fn labeled_total(text: &str) -> Option<Decimal> {
    first_parsed(&TOTAL_PATTERNS, text, parse_amount)
}

fn largest_currency_amount(text: &str) -> Option<Decimal> {
    let largest = currency_amounts(text).into_iter().max();
    trace!("No labeled total, largest currency amount: {:?}", largest);
    largest
}

/// Every currency-prefixed amount in the text that parses, in text order.
pub fn currency_amounts(text: &str) -> Vec<Decimal> {
    CURRENCY_AMOUNT
        .captures_iter(text)
        .filter_map(|caps| parse_amount(&caps[1]))
        .collect()
}

/// Parse an amount token such as `$1,234.56`, `1234.5` or `12.`.
///
/// Returns `None` for tokens without digits. Tokens with more digits than a
/// `Decimal` holds are parsed as floats, and values beyond the `Decimal`
/// range saturate at `Decimal::MAX`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let cleaned = cleaned.trim_end_matches('.');

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    Decimal::from_str(cleaned).ok().or_else(|| {
        let value: f64 = cleaned.parse().ok()?;
        trace!("Amount {} out of decimal precision, parsed as float", cleaned);
        Some(Decimal::from_f64(value).unwrap_or(Decimal::MAX))
    })
}

/// Format an amount with thousands separators and two decimals (1,234.56).
pub fn format_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.round_dp(2));
    let (sign, s) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let Some((integer_part, decimal_part)) = s.split_once('.') else {
        return format!("{}{}", sign, s);
    };

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    format!("{}{}.{}", sign, formatted, decimal_part)
}
