//! Core library for invoice text extraction and spending insights.
//!
//! This crate provides:
//! - Rule-based field extraction from OCR or PDF text (invoice number,
//!   date, vendor, totals, tax, line items)
//! - Keyword categorization and a heuristic confidence score
//! - Spending summaries and cost saving suggestions over many invoices
//! - Invoice batch and configuration models

pub mod error;
pub mod insights;
pub mod invoice;
pub mod models;
pub mod sample;

pub use error::{Result, TallyError};
pub use insights::{InsightsAggregator, SpendingInsights};
pub use invoice::{analyze, ExtractionResult, InvoiceAnalyzer, InvoiceExtractor};
pub use models::batch::InvoiceBatch;
pub use models::config::TallyConfig;
pub use models::invoice::{InvoiceRecord, LineItem, ProcessedInvoice, NOT_FOUND, UNCATEGORIZED};
