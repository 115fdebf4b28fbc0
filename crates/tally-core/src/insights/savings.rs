//! Cost saving suggestions.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::trace;

use crate::invoice::rules::format_amount;
use crate::models::invoice::InvoiceRecord;

use super::summary::{group_totals, largest_group};

/// Suggest reviewing the highest-spending category.
pub(crate) fn review_top_category<R: AsRef<InvoiceRecord>>(
    records: &[R],
    currency: &str,
) -> Option<String> {
    let totals = group_totals(records, |r| &r.category);
    let category = largest_group(&totals)?;
    let amount = totals[&category];

    Some(format!(
        "Consider reviewing {} expenses ({}{} total)",
        category,
        currency,
        format_amount(amount)
    ))
}

/// Suggest consolidating with the most frequent repeated vendor. A batch
/// from a single vendor has nothing to consolidate.
pub(crate) fn consolidate_vendor<R: AsRef<InvoiceRecord>>(records: &[R]) -> Option<String> {
    let frequencies = vendor_frequencies(records);
    if frequencies.len() < 2 {
        return None;
    }

    let (vendor, count) = frequencies.into_iter().next()?;
    if count < 2 {
        return None;
    }

    Some(format!(
        "Consolidate purchases with {} for potential bulk discounts",
        vendor
    ))
}

/// Suggest reviewing invoices strictly above the `q` quantile of totals.
pub(crate) fn review_high_value<R: AsRef<InvoiceRecord>>(
    records: &[R],
    q: Decimal,
    currency: &str,
) -> Option<String> {
    let amounts: Vec<Decimal> = records.iter().map(|r| r.as_ref().total_amount).collect();
    let threshold = quantile(&amounts, q)?;
    trace!("High-value threshold at quantile {}: {}", q, threshold);

    let min = amounts.iter().filter(|a| **a > threshold).min()?;

    Some(format!(
        "Review high-value invoices ({}{:.2}+ range)",
        currency,
        min.round_dp(2)
    ))
}

/// Vendor invoice counts, most frequent first. Ties keep first-appearance
/// order.
pub fn vendor_frequencies<R: AsRef<InvoiceRecord>>(records: &[R]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for record in records.iter().map(AsRef::as_ref) {
        match counts.iter_mut().find(|(v, _)| *v == record.vendor) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.vendor.clone(), 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Quantile with linear interpolation between closest ranks.
///
/// `q` is clamped to `[0, 1]`. Returns `None` for an empty slice.
pub fn quantile(values: &[Decimal], q: Decimal) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort();

    let q = q.clamp(Decimal::ZERO, Decimal::ONE);
    let position = q * Decimal::from(sorted.len() - 1);
    let lower = position.floor();
    let fraction = position - lower;

    let lo = lower.to_usize()?;
    let hi = (lo + 1).min(sorted.len() - 1);

    let spread = sorted[hi].checked_sub(sorted[lo])?;
    Some(sorted[lo].saturating_add(spread.saturating_mul(fraction)))
}
