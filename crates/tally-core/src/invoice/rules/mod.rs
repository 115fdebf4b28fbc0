//! Rule-based field extractors.

pub mod amounts;
pub mod category;
pub mod confidence;
pub mod dates;
pub mod invoice_number;
pub mod items;
pub mod patterns;
pub mod vendor;

pub use amounts::{currency_amounts, format_amount, parse_amount, TaxExtractor, TotalExtractor};
pub use category::{categorize, category_scores, CATEGORY_KEYWORDS};
pub use confidence::confidence_score;
pub use dates::{normalize_date, parse_date, DateExtractor};
pub use invoice_number::InvoiceNumberExtractor;
pub use items::{items_total, parse_line, LineItemParser};
pub use vendor::VendorExtractor;

/// Trait for single-field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text, or `None` if no rule applies.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// One step of a fallback chain.
pub type Strategy<T> = fn(&str) -> Option<T>;

/// Run strategies in priority order and return the first value produced.
pub fn first_match<T>(strategies: &[Strategy<T>], text: &str) -> Option<T> {
    strategies.iter().find_map(|strategy| strategy(text))
}
