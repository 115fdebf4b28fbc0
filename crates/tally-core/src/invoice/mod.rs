//! Invoice field extraction module.

mod analyzer;
pub mod rules;

pub use analyzer::{ExtractionResult, InvoiceAnalyzer};

use std::time::Instant;

use crate::models::invoice::InvoiceRecord;

/// Trait for invoice text analyzers.
pub trait InvoiceExtractor {
    /// Extract a record from plain text. Never fails: fields that cannot be
    /// found hold their sentinel values.
    fn analyze(&self, text: &str) -> InvoiceRecord;

    /// Like [`analyze`](Self::analyze), with warnings and timing.
    fn extract(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let record = self.analyze(text);
        let warnings = record
            .missing_fields()
            .into_iter()
            .map(|field| format!("Could not extract {}", field))
            .collect();

        ExtractionResult {
            record,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Analyze `text` with the default analyzer.
pub fn analyze(text: &str) -> InvoiceRecord {
    InvoiceAnalyzer::new().analyze(text)
}
