//! Invoice records produced by the extraction pipeline.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel for string fields that could not be extracted.
pub const NOT_FOUND: &str = "Not found";

/// Category assigned when no taxonomy keyword matches.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Format used for the caller-supplied processing timestamp.
pub const PROCESSED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Structured fields extracted from one invoice text.
///
/// Every field is always populated: fields that could not be located hold
/// [`NOT_FOUND`] (strings) or zero (amounts).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Invoice identifier, upper-cased.
    pub invoice_number: String,

    /// `YYYY-MM-DD` when the date could be parsed, otherwise the raw match.
    pub date: String,

    /// Vendor / company name.
    pub vendor: String,

    /// Invoice total.
    pub total_amount: Decimal,

    /// Tax amount.
    pub tax_amount: Decimal,

    /// Candidate line items, in text order.
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Spending category label.
    pub category: String,

    /// Extraction confidence (0.0 - 100.0).
    pub confidence: f32,
}

impl InvoiceRecord {
    /// Record with every field set to its sentinel.
    pub fn empty() -> Self {
        Self {
            invoice_number: NOT_FOUND.to_string(),
            date: NOT_FOUND.to_string(),
            vendor: NOT_FOUND.to_string(),
            total_amount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            items: Vec::new(),
            category: UNCATEGORIZED.to_string(),
            confidence: 0.0,
        }
    }

    /// Names of the fields still holding their sentinel value.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.invoice_number == NOT_FOUND {
            missing.push("invoice_number");
        }
        if self.date == NOT_FOUND {
            missing.push("date");
        }
        if self.vendor == NOT_FOUND {
            missing.push("vendor");
        }
        if self.total_amount.is_zero() {
            missing.push("total_amount");
        }
        if self.tax_amount.is_zero() {
            missing.push("tax_amount");
        }
        if self.items.is_empty() {
            missing.push("items");
        }
        if self.category == UNCATEGORIZED {
            missing.push("category");
        }

        missing
    }
}

impl Default for InvoiceRecord {
    fn default() -> Self {
        Self::empty()
    }
}

impl AsRef<InvoiceRecord> for InvoiceRecord {
    fn as_ref(&self) -> &InvoiceRecord {
        self
    }
}

/// A single line item found in the invoice body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description with the amount removed.
    pub description: String,

    /// Line amount.
    pub amount: Decimal,

    /// Quantity, at least 1.
    pub quantity: u32,

    /// `amount / quantity`.
    pub unit_price: Decimal,
}

impl LineItem {
    /// Create a line item, deriving the unit price. A zero quantity is
    /// treated as 1.
    pub fn new(description: impl Into<String>, amount: Decimal, quantity: u32) -> Self {
        let quantity = quantity.max(1);
        Self {
            description: description.into(),
            amount,
            quantity,
            unit_price: amount / Decimal::from(quantity),
        }
    }
}

/// An extracted record plus the metadata the caller attaches to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedInvoice {
    /// Source file name.
    pub filename: String,

    /// When the record was produced (`YYYY-MM-DD HH:MM:SS`).
    pub processed_date: String,

    /// Text the record was extracted from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,

    /// Extracted fields.
    #[serde(flatten)]
    pub record: InvoiceRecord,
}

impl ProcessedInvoice {
    pub fn new(
        filename: impl Into<String>,
        record: InvoiceRecord,
        processed_at: NaiveDateTime,
    ) -> Self {
        Self {
            filename: filename.into(),
            processed_date: processed_at.format(PROCESSED_DATE_FORMAT).to_string(),
            extracted_text: None,
            record,
        }
    }

    /// Keep the source text alongside the record.
    pub fn with_extracted_text(mut self, text: impl Into<String>) -> Self {
        self.extracted_text = Some(text.into());
        self
    }
}

impl AsRef<InvoiceRecord> for ProcessedInvoice {
    fn as_ref(&self) -> &InvoiceRecord {
        &self.record
    }
}
