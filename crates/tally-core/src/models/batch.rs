//! Caller-owned collection of processed invoices.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TallyError};

use super::invoice::ProcessedInvoice;

/// Current batch serialization version.
pub const BATCH_VERSION: u32 = 1;

/// Ordered collection of processed invoices.
///
/// The extraction pipeline never owns this; callers append records as they
/// process documents and hand the whole batch to the insights aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceBatch {
    version: u32,
    invoices: Vec<ProcessedInvoice>,
}

impl InvoiceBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self {
            version: BATCH_VERSION,
            invoices: Vec::new(),
        }
    }

    /// Append one invoice.
    pub fn push(&mut self, invoice: ProcessedInvoice) {
        self.invoices.push(invoice);
    }

    /// Remove every invoice.
    pub fn clear(&mut self) {
        self.invoices.clear();
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProcessedInvoice> {
        self.invoices.iter()
    }

    /// Invoices in insertion order.
    pub fn invoices(&self) -> &[ProcessedInvoice] {
        &self.invoices
    }

    /// Parse a batch from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        let batch: Self = serde_json::from_str(json)?;
        if batch.version != BATCH_VERSION {
            return Err(TallyError::Batch(format!(
                "unsupported batch version {} (expected {})",
                batch.version, BATCH_VERSION
            )));
        }
        Ok(batch)
    }

    /// Serialize the batch to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for InvoiceBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<ProcessedInvoice> for InvoiceBatch {
    fn extend<I: IntoIterator<Item = ProcessedInvoice>>(&mut self, iter: I) {
        self.invoices.extend(iter);
    }
}

impl FromIterator<ProcessedInvoice> for InvoiceBatch {
    fn from_iter<I: IntoIterator<Item = ProcessedInvoice>>(iter: I) -> Self {
        let mut batch = Self::new();
        batch.extend(iter);
        batch
    }
}

impl<'a> IntoIterator for &'a InvoiceBatch {
    type Item = &'a ProcessedInvoice;
    type IntoIter = std::slice::Iter<'a, ProcessedInvoice>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoice::InvoiceRecord;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn invoice(name: &str) -> ProcessedInvoice {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        ProcessedInvoice::new(name, InvoiceRecord::empty(), at)
    }

    #[test]
    fn test_push_and_clear() {
        let mut batch = InvoiceBatch::new();
        batch.push(invoice("a.txt"));
        batch.extend([invoice("b.txt"), invoice("c.txt")]);

        assert_eq!(batch.len(), 3);
        let names: Vec<_> = batch.iter().map(|i| i.filename.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);

        batch.clear();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let batch: InvoiceBatch = vec![invoice("a.txt")].into_iter().collect();
        let json = batch.to_json().unwrap();
        assert_eq!(InvoiceBatch::from_json(&json).unwrap(), batch);
    }

    #[test]
    fn test_rejects_unknown_version() {
        let err = InvoiceBatch::from_json(r#"{"version": 99, "invoices": []}"#).unwrap_err();
        assert!(matches!(err, TallyError::Batch(_)));
    }
}
