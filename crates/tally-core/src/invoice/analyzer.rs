//! Rule-based invoice analyzer.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::invoice::{InvoiceRecord, NOT_FOUND};

use super::InvoiceExtractor;
use super::rules::{
    categorize, confidence_score, normalize_date, DateExtractor, FieldExtractor,
    InvoiceNumberExtractor, LineItemParser, TaxExtractor, TotalExtractor, VendorExtractor,
};

/// Result of analyzing one text, with diagnostics.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: InvoiceRecord,
    /// One warning per field left at its sentinel value.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Invoice analyzer built from the rule extractors.
pub struct InvoiceAnalyzer {
    invoice_number: InvoiceNumberExtractor,
    date: DateExtractor,
    vendor: VendorExtractor,
    total: TotalExtractor,
    tax: TaxExtractor,
    items: LineItemParser,
    extract_line_items: bool,
}

impl InvoiceAnalyzer {
    /// Create an analyzer with default settings.
    pub fn new() -> Self {
        Self {
            invoice_number: InvoiceNumberExtractor::new(),
            date: DateExtractor::new(),
            vendor: VendorExtractor::new(),
            total: TotalExtractor::new(),
            tax: TaxExtractor::new(),
            items: LineItemParser::new(),
            extract_line_items: true,
        }
    }

    /// Create an analyzer from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_vendor_scan_lines(config.vendor_scan_lines)
            .with_line_items(config.extract_line_items)
    }

    /// Set how many leading lines are searched for the vendor.
    pub fn with_vendor_scan_lines(mut self, lines: usize) -> Self {
        self.vendor = VendorExtractor::new().with_scan_lines(lines);
        self
    }

    /// Enable or disable line item parsing.
    pub fn with_line_items(mut self, enabled: bool) -> Self {
        self.extract_line_items = enabled;
        self
    }
}

impl Default for InvoiceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceExtractor for InvoiceAnalyzer {
    fn analyze(&self, text: &str) -> InvoiceRecord {
        if text.trim().is_empty() {
            debug!("Empty text, returning sentinel record");
            return InvoiceRecord::empty();
        }

        debug!("Analyzing invoice from {} characters of text", text.len());

        let not_found = || NOT_FOUND.to_string();

        let record = InvoiceRecord {
            invoice_number: self.invoice_number.extract(text).unwrap_or_else(not_found),
            date: self
                .date
                .extract(text)
                .map(|raw| normalize_date(&raw))
                .unwrap_or_else(not_found),
            vendor: self.vendor.extract(text).unwrap_or_else(not_found),
            total_amount: self.total.extract(text).unwrap_or(Decimal::ZERO),
            tax_amount: self.tax.extract(text).unwrap_or(Decimal::ZERO),
            items: if self.extract_line_items {
                self.items.parse(text)
            } else {
                Vec::new()
            },
            category: categorize(text).to_string(),
            confidence: confidence_score(text),
        };

        debug!(
            "Extracted invoice {} from {} ({} items, confidence {:.1})",
            record.invoice_number,
            record.vendor,
            record.items.len(),
            record.confidence
        );

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoice::UNCATEGORIZED;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_empty_text() {
        let analyzer = InvoiceAnalyzer::new();
        assert_eq!(analyzer.analyze(""), InvoiceRecord::empty());
        assert_eq!(analyzer.analyze("  \n\t"), InvoiceRecord::empty());
    }

    #[test]
    fn test_basic_scenario() {
        let text = "INVOICE: OS-2024-001\nDATE: 01/15/2024\nTOTAL: $245.67\nTAX: $19.65";
        let record = InvoiceAnalyzer::new().analyze(text);

        assert_eq!(record.invoice_number, "OS-2024-001");
        assert_eq!(record.date, "2024-01-15");
        assert_eq!(record.total_amount, dec("245.67"));
        assert_eq!(record.tax_amount, dec("19.65"));
    }

    #[test]
    fn test_office_supplies_invoice() {
        let text = "OFFICE DEPOT INC.\nINVOICE: OS-2024-001\nDATE: 01/15/2024\n\
                    HP Printer Paper A4 $89.95\nStapler Heavy Duty $45.98\n\
                    File Folders Legal Size $89.09\nSubtotal: $226.02\nTax: $19.65\nTOTAL: $245.67";
        let record = InvoiceAnalyzer::new().analyze(text);

        assert_eq!(record.vendor, "OFFICE DEPOT INC.");
        assert_eq!(record.total_amount, dec("245.67"));
        assert_eq!(record.category, "Office Supplies");
        assert!(record.items.iter().any(|i| i.description == "Stapler Heavy Duty"));
        assert!(record.confidence > 0.0 && record.confidence <= 100.0);
    }

    #[test]
    fn test_no_currency_amounts() {
        let text = "Meeting notes\nDiscussed the roadmap for next quarter";
        let record = InvoiceAnalyzer::new().analyze(text);
        assert_eq!(record.total_amount, Decimal::ZERO);
        assert_eq!(record.tax_amount, Decimal::ZERO);
    }

    #[test]
    fn test_unparseable_date_kept_raw() {
        let record = InvoiceAnalyzer::new().analyze("Date: 31/31/2024\nTotal: $5.00");
        assert_eq!(record.date, "31/31/2024");
    }

    #[test]
    fn test_line_items_can_be_disabled() {
        let text = "Acme Widgets\nWidget $5.00\nGadget $7.00";
        let analyzer = InvoiceAnalyzer::new().with_line_items(false);
        assert!(analyzer.analyze(text).items.is_empty());
        assert_eq!(InvoiceAnalyzer::new().analyze(text).items.len(), 2);
    }

    #[test]
    fn test_extract_reports_missing_fields() {
        let result = InvoiceAnalyzer::new().extract("Lunch at the restaurant");
        assert_eq!(result.record.category, "Meals & Entertainment");
        assert!(result.warnings.contains(&"Could not extract total_amount".to_string()));
        assert!(!result.warnings.iter().any(|w| w.contains("category")));

        let empty = InvoiceAnalyzer::new().extract("");
        assert_eq!(empty.record.category, UNCATEGORIZED);
        assert_eq!(empty.record.confidence, 0.0);
    }
}
