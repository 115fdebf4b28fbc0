//! Output formatting for extracted invoices and insights.

use std::io::Write;

use serde::Serialize;

use tally_core::insights::SpendingInsights;
use tally_core::invoice::rules::format_amount;
use tally_core::models::invoice::{LineItem, ProcessedInvoice};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
    /// XML output
    Xml,
}

impl OutputFormat {
    /// File extension for per-invoice output files.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
            OutputFormat::Xml => "xml",
        }
    }
}

/// Columns written for each invoice in CSV output.
const CSV_HEADER: [&str; 10] = [
    "filename",
    "invoice_number",
    "date",
    "vendor",
    "category",
    "total_amount",
    "tax_amount",
    "item_count",
    "confidence",
    "processed_date",
];

pub fn format_invoice(invoice: &ProcessedInvoice, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(invoice)?),
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            write_invoices_csv(&mut buf, std::slice::from_ref(invoice))?;
            Ok(String::from_utf8(buf)?)
        }
        OutputFormat::Text => Ok(format_text(invoice)),
        OutputFormat::Xml => format_xml(invoice),
    }
}

/// Write invoices as CSV, one row per invoice.
pub fn write_invoices_csv<W: Write>(writer: W, invoices: &[ProcessedInvoice]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(CSV_HEADER)?;

    for invoice in invoices {
        let record = &invoice.record;
        wtr.write_record([
            invoice.filename.as_str(),
            &record.invoice_number,
            &record.date,
            &record.vendor,
            &record.category,
            &record.total_amount.to_string(),
            &record.tax_amount.to_string(),
            &record.items.len().to_string(),
            &format!("{:.1}", record.confidence),
            &invoice.processed_date,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn format_text(invoice: &ProcessedInvoice) -> String {
    let record = &invoice.record;
    let mut output = String::new();

    output.push_str(&format!("File: {}\n", invoice.filename));
    output.push_str(&format!("Invoice: {}\n", record.invoice_number));
    output.push_str(&format!("Date: {}\n", record.date));
    output.push_str(&format!("Vendor: {}\n", record.vendor));
    output.push_str(&format!("Category: {}\n", record.category));
    output.push('\n');

    if !record.items.is_empty() {
        output.push_str("Items:\n");
        for item in &record.items {
            output.push_str(&format!(
                "  {} x{} @ {} = {}\n",
                item.description,
                item.quantity,
                format_amount(item.unit_price),
                format_amount(item.amount)
            ));
        }
        output.push('\n');
    }

    output.push_str("Summary:\n");
    output.push_str(&format!("  Tax:   {}\n", format_amount(record.tax_amount)));
    output.push_str(&format!("  Total: {}\n", format_amount(record.total_amount)));

    output
}

#[derive(Serialize)]
struct XmlInvoice<'a> {
    filename: &'a str,
    processed_date: &'a str,
    invoice_number: &'a str,
    date: &'a str,
    vendor: &'a str,
    total_amount: String,
    tax_amount: String,
    category: &'a str,
    confidence: f32,
    items: XmlItems<'a>,
}

#[derive(Serialize)]
struct XmlItems<'a> {
    #[serde(rename = "item")]
    items: &'a [LineItem],
}

fn format_xml(invoice: &ProcessedInvoice) -> anyhow::Result<String> {
    let record = &invoice.record;
    let xml = XmlInvoice {
        filename: &invoice.filename,
        processed_date: &invoice.processed_date,
        invoice_number: &record.invoice_number,
        date: &record.date,
        vendor: &record.vendor,
        total_amount: record.total_amount.to_string(),
        tax_amount: record.tax_amount.to_string(),
        category: &record.category,
        confidence: record.confidence,
        items: XmlItems {
            items: &record.items,
        },
    };

    Ok(quick_xml::se::to_string_with_root("invoice", &xml)?)
}

/// Human-readable insights report.
pub fn format_insights_text(
    insights: &SpendingInsights,
    suggestions: &[String],
    currency: &str,
) -> String {
    let mut output = String::new();

    if insights.is_empty() {
        output.push_str("No invoice data available.\n");
        return output;
    }

    let money = |amount| format!("{}{}", currency, format_amount(amount));

    output.push_str(&format!("Invoices:        {}\n", insights.invoice_count));
    output.push_str(&format!("Total spending:  {}\n", money(insights.total_spending)));
    output.push_str(&format!("Total tax:       {}\n", money(insights.total_tax)));
    output.push_str(&format!("Average invoice: {}\n", money(insights.average_invoice)));
    output.push_str(&format!("Highest invoice: {}\n", money(insights.highest_invoice)));
    output.push_str(&format!("Monthly average: {}\n", money(insights.monthly_average)));
    if let Some(category) = &insights.top_category {
        output.push_str(&format!("Top category:    {}\n", category));
    }
    if let Some(vendor) = &insights.top_vendor {
        output.push_str(&format!("Top vendor:      {}\n", vendor));
    }
    if let Some(vendor) = &insights.most_frequent_vendor {
        output.push_str(&format!("Frequent vendor: {}\n", vendor));
    }

    output.push_str("\nBy category:\n");
    for (category, amount) in &insights.category_distribution {
        output.push_str(&format!("  {}: {}\n", category, money(*amount)));
    }

    output.push_str("\nBy vendor:\n");
    for (vendor, amount) in &insights.vendor_distribution {
        output.push_str(&format!("  {}: {}\n", vendor, money(*amount)));
    }

    if !suggestions.is_empty() {
        output.push_str("\nSuggestions:\n");
        for suggestion in suggestions {
            output.push_str(&format!("  - {}\n", suggestion));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_core::insights::InsightsAggregator;
    use tally_core::sample::sample_invoices;

    fn samples() -> Vec<ProcessedInvoice> {
        let at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        sample_invoices(at)
    }

    #[test]
    fn test_csv_rows() {
        let mut buf = Vec::new();
        write_invoices_csv(&mut buf, &samples()).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("filename,invoice_number,date,vendor"));
        assert!(lines[1].starts_with("office_supplies_001.pdf,OS-2024-001,2024-01-15,Office Depot Inc.,Office Supplies,245.67,19.65,3,95.2,"));
        assert!(lines[5].contains(",Meals & Entertainment,"));
    }

    #[test]
    fn test_text_and_json() {
        let invoices = samples();
        let invoice = &invoices[0];
        let text = format_invoice(invoice, OutputFormat::Text).unwrap();
        assert!(text.contains("Invoice: OS-2024-001"));
        assert!(text.contains("  Total: 245.67"));

        let json = format_invoice(invoice, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["invoice_number"], "OS-2024-001");
        assert_eq!(value["total_amount"], "245.67");
    }

    #[test]
    fn test_xml() {
        let xml = format_invoice(&samples()[0], OutputFormat::Xml).unwrap();
        assert!(xml.starts_with("<invoice>"));
        assert!(xml.contains("<invoice_number>OS-2024-001</invoice_number>"));
        assert!(xml.contains("<total_amount>245.67</total_amount>"));
    }

    #[test]
    fn test_insights_text() {
        let invoices = samples();
        let aggregator = InsightsAggregator::new();
        let report = format_insights_text(
            &aggregator.aggregate(&invoices),
            &aggregator.suggest_cost_savings(&invoices),
            "$",
        );
        assert!(report.contains("Total spending:  $3,848.15"));
        assert!(report.contains("Top category:    Technology"));
        assert!(report.contains("Total tax:       $341.69"));
        assert!(report.contains("Frequent vendor: City Electric Company"));
        assert!(report.contains("  - Review high-value invoices ($1299.00+ range)"));

        let empty = format_insights_text(&SpendingInsights::default(), &[], "$");
        assert_eq!(empty, "No invoice data available.\n");
    }
}
