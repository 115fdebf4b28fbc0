//! Invoice number extraction.

use super::patterns::{first_capture, INVOICE_NUMBER_PATTERNS};
use super::FieldExtractor;

/// Invoice number extractor. The matched identifier is upper-cased.
pub struct InvoiceNumberExtractor;

impl InvoiceNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InvoiceNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceNumberExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<String> {
        first_capture(&INVOICE_NUMBER_PATTERNS, text).map(str::to_uppercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Option<String> {
        InvoiceNumberExtractor::new().extract(text)
    }

    #[test]
    fn test_labeled_number() {
        assert_eq!(extract("INVOICE: OS-2024-001"), Some("OS-2024-001".to_string()));
        assert_eq!(
            extract("Invoice Number: HTL-789123"),
            Some("HTL-789123".to_string())
        );
        assert_eq!(extract("invoice #: sw-2024-456"), Some("SW-2024-456".to_string()));
    }

    #[test]
    fn test_inv_abbreviation() {
        assert_eq!(extract("Inv No 4471"), Some("4471".to_string()));
        assert_eq!(extract("INV# A-17"), Some("A-17".to_string()));
    }

    #[test]
    fn test_hash_fallback() {
        assert_eq!(extract("Order #77-B"), Some("77-B".to_string()));
    }

    #[test]
    fn test_not_found() {
        assert_eq!(extract("Receipt for services rendered"), None);
    }
}
