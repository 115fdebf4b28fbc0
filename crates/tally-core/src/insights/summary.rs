//! Spending summary statistics.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::invoice::InvoiceRecord;

/// Summary statistics over a collection of invoices.
///
/// The default value is the empty summary returned for an empty collection.
/// Sums saturate at `Decimal::MAX`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendingInsights {
    pub invoice_count: usize,
    pub total_spending: Decimal,
    pub total_tax: Decimal,
    pub average_invoice: Decimal,
    /// Category with the largest summed amount.
    pub top_category: Option<String>,
    /// Vendor with the largest summed amount.
    pub top_vendor: Option<String>,
    /// Vendor with the most invoices. Ties go to the first name in sorted
    /// order.
    pub most_frequent_vendor: Option<String>,
    pub highest_invoice: Decimal,
    /// Total spending divided by the number of distinct invoice dates.
    pub monthly_average: Decimal,
    pub category_distribution: BTreeMap<String, Decimal>,
    pub vendor_distribution: BTreeMap<String, Decimal>,
}

impl SpendingInsights {
    pub fn is_empty(&self) -> bool {
        self.invoice_count == 0
    }
}

/// Compute summary statistics. An empty collection yields
/// [`SpendingInsights::default`].
pub fn summarize<R: AsRef<InvoiceRecord>>(records: &[R]) -> SpendingInsights {
    if records.is_empty() {
        return SpendingInsights::default();
    }

    let mut total = Decimal::ZERO;
    let mut tax = Decimal::ZERO;
    let mut highest = Decimal::MIN;
    let mut dates = BTreeSet::new();
    let mut vendor_counts: BTreeMap<String, usize> = BTreeMap::new();

    for record in records.iter().map(AsRef::as_ref) {
        total = total.saturating_add(record.total_amount);
        tax = tax.saturating_add(record.tax_amount);
        *vendor_counts.entry(record.vendor.clone()).or_default() += 1;
        highest = highest.max(record.total_amount);
        dates.insert(record.date.as_str());
    }

    let category_distribution = group_totals(records, |r| &r.category);
    let vendor_distribution = group_totals(records, |r| &r.vendor);

    SpendingInsights {
        invoice_count: records.len(),
        total_spending: total,
        total_tax: tax,
        average_invoice: total / Decimal::from(records.len()),
        top_category: largest_group(&category_distribution),
        top_vendor: largest_group(&vendor_distribution),
        most_frequent_vendor: largest_group(&vendor_counts),
        highest_invoice: highest,
        monthly_average: total / Decimal::from(dates.len().max(1)),
        category_distribution,
        vendor_distribution,
    }
}

/// Sum `total_amount` per key.
pub(crate) fn group_totals<R, F>(records: &[R], key: F) -> BTreeMap<String, Decimal>
where
    R: AsRef<InvoiceRecord>,
    F: Fn(&InvoiceRecord) -> &String,
{
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for record in records.iter().map(AsRef::as_ref) {
        let entry = totals.entry(key(record).clone()).or_default();
        *entry = entry.saturating_add(record.total_amount);
    }
    totals
}

/// Key with the largest value. Ties go to the first key in sorted order.
pub(crate) fn largest_group<V: PartialOrd + Copy>(totals: &BTreeMap<String, V>) -> Option<String> {
    let mut best: Option<(&String, V)> = None;
    for (key, amount) in totals {
        if best.is_none_or(|(_, top)| *amount > top) {
            best = Some((key, *amount));
        }
    }
    best.map(|(key, _)| key.clone())
}
