//! Spending insights over a collection of invoices.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::insights::InsightsAggregator;
//!
//! let aggregator = InsightsAggregator::from_config(&config.insights);
//! let summary = aggregator.aggregate(batch.invoices());
//! for suggestion in aggregator.suggest_cost_savings(batch.invoices()) {
//!     println!("{}", suggestion);
//! }
//! ```

pub mod savings;
pub mod summary;

pub use savings::{quantile, vendor_frequencies};
pub use summary::SpendingInsights;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::config::InsightsConfig;
use crate::models::invoice::InvoiceRecord;

/// Aggregates invoice records into summaries and suggestions.
#[derive(Debug, Clone)]
pub struct InsightsAggregator {
    high_value_quantile: Decimal,
    currency_symbol: String,
}

impl InsightsAggregator {
    /// Aggregator with a 0.9 high-value quantile and `$` amounts.
    pub fn new() -> Self {
        Self {
            high_value_quantile: Decimal::new(9, 1),
            currency_symbol: "$".to_string(),
        }
    }

    pub fn from_config(config: &InsightsConfig) -> Self {
        Self::new()
            .with_high_value_quantile(config.high_value_quantile)
            .with_currency_symbol(&config.currency_symbol)
    }

    /// Set the quantile above which invoices count as high-value.
    /// Values that are not finite are ignored.
    pub fn with_high_value_quantile(mut self, q: f64) -> Self {
        if let Some(q) = Decimal::from_f64(q) {
            self.high_value_quantile = q.clamp(Decimal::ZERO, Decimal::ONE);
        }
        self
    }

    pub fn with_currency_symbol(mut self, symbol: &str) -> Self {
        self.currency_symbol = symbol.to_string();
        self
    }

    /// Summary statistics. Empty input gives an empty summary.
    pub fn aggregate<R: AsRef<InvoiceRecord>>(&self, records: &[R]) -> SpendingInsights {
        debug!("Aggregating {} invoices", records.len());
        summary::summarize(records)
    }

    /// Up to three suggestions, in order: top category, repeated vendor,
    /// high-value invoices. Each is omitted when it does not apply.
    pub fn suggest_cost_savings<R: AsRef<InvoiceRecord>>(&self, records: &[R]) -> Vec<String> {
        if records.is_empty() {
            return Vec::new();
        }

        let suggestions: Vec<String> = [
            savings::review_top_category(records, &self.currency_symbol),
            savings::consolidate_vendor(records),
            savings::review_high_value(records, self.high_value_quantile, &self.currency_symbol),
        ]
        .into_iter()
        .flatten()
        .collect();

        debug!("Produced {} cost saving suggestions", suggestions.len());
        suggestions
    }
}

impl Default for InsightsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics with default settings.
pub fn aggregate<R: AsRef<InvoiceRecord>>(records: &[R]) -> SpendingInsights {
    InsightsAggregator::new().aggregate(records)
}

/// Cost saving suggestions with default settings.
pub fn suggest_cost_savings<R: AsRef<InvoiceRecord>>(records: &[R]) -> Vec<String> {
    InsightsAggregator::new().suggest_cost_savings(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(vendor: &str, category: &str, total: i64) -> InvoiceRecord {
        InvoiceRecord {
            vendor: vendor.to_string(),
            category: category.to_string(),
            total_amount: Decimal::from(total),
            ..InvoiceRecord::empty()
        }
    }

    #[test]
    fn test_aggregate_scenario() {
        let records = vec![
            record("A", "Travel", 100),
            record("B", "Travel", 200),
            record("C", "Utilities", 300),
        ];
        let insights = aggregate(&records);
        assert_eq!(insights.total_spending, Decimal::from(600));
        assert_eq!(insights.average_invoice, Decimal::from(200));
        assert_eq!(insights.highest_invoice, Decimal::from(300));
    }

    #[test]
    fn test_suggestions_in_order() {
        let records = vec![
            record("Acme Inc", "Travel", 100),
            record("Acme Inc", "Travel", 200),
            record("Bolt LLC", "Utilities", 300),
        ];
        assert_eq!(
            suggest_cost_savings(&records),
            vec![
                "Consider reviewing Travel expenses ($300.00 total)".to_string(),
                "Consolidate purchases with Acme Inc for potential bulk discounts".to_string(),
                "Review high-value invoices ($300.00+ range)".to_string(),
            ]
        );
    }

    #[test]
    fn test_single_vendor_never_consolidates() {
        let records = vec![
            record("Acme Inc", "Travel", 10),
            record("Acme Inc", "Travel", 20),
        ];
        assert!(suggest_cost_savings(&records)
            .iter()
            .all(|s| !s.starts_with("Consolidate")));

        let single = vec![record("Acme Inc", "Travel", 10)];
        assert!(suggest_cost_savings(&single)
            .iter()
            .all(|s| !s.starts_with("Consolidate")));
    }

    #[test]
    fn test_extracted_huge_totals() {
        let record = crate::invoice::analyze("TOTAL: $79228162514264337593543950335");
        let records = vec![record.clone(), record];

        let insights = aggregate(&records);
        assert_eq!(insights.total_spending, Decimal::MAX);
        assert_eq!(insights.highest_invoice, Decimal::MAX);
        assert_eq!(suggest_cost_savings(&records).len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<InvoiceRecord> = Vec::new();
        assert!(aggregate(&records).is_empty());
        assert!(suggest_cost_savings(&records).is_empty());
    }

    #[test]
    fn test_config() {
        let config = InsightsConfig {
            high_value_quantile: 0.0,
            currency_symbol: "€".to_string(),
        };
        let aggregator = InsightsAggregator::from_config(&config);
        let records = vec![record("A", "Travel", 100), record("B", "Travel", 200)];
        assert_eq!(
            aggregator.suggest_cost_savings(&records),
            vec![
                "Consider reviewing Travel expenses (€300.00 total)".to_string(),
                "Review high-value invoices (€200.00+ range)".to_string(),
            ]
        );
    }
}
