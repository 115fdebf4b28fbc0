//! Built-in sample invoices for demos and tests.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::models::invoice::{InvoiceRecord, LineItem, ProcessedInvoice};

struct SampleInvoice {
    filename: &'static str,
    invoice_number: &'static str,
    date: &'static str,
    vendor: &'static str,
    total_cents: i64,
    tax_cents: i64,
    category: &'static str,
    items: &'static [(&'static str, i64, u32)],
    confidence: f32,
    text: &'static str,
}

const SAMPLES: &[SampleInvoice] = &[
    SampleInvoice {
        filename: "office_supplies_001.pdf",
        invoice_number: "OS-2024-001",
        date: "2024-01-15",
        vendor: "Office Depot Inc.",
        total_cents: 24567,
        tax_cents: 1965,
        category: "Office Supplies",
        items: &[
            ("HP Printer Paper A4", 8995, 5),
            ("Stapler Heavy Duty", 4598, 2),
            ("File Folders Legal Size", 8909, 10),
        ],
        confidence: 95.2,
        text: "OFFICE DEPOT INC.\nINVOICE: OS-2024-001\nDATE: 01/15/2024\n\
               HP Printer Paper A4 $89.95\nStapler Heavy Duty $45.98\n\
               File Folders Legal Size $89.09\nSubtotal: $226.02\nTax: $19.65\nTOTAL: $245.67",
    },
    SampleInvoice {
        filename: "utility_electric_002.pdf",
        invoice_number: "ELC-456789",
        date: "2024-01-20",
        vendor: "City Electric Company",
        total_cents: 48723,
        tax_cents: 3898,
        category: "Utilities",
        items: &[("Electricity Usage - Commercial", 48723, 1)],
        confidence: 92.7,
        text: "CITY ELECTRIC COMPANY\nAccount: 123456789\nInvoice: ELC-456789\n\
               Service Period: 12/20/2023 - 01/20/2024\nElectricity Usage - Commercial\n\
               Total Usage: 2,456 kWh\nRate: $0.18/kWh\nSubtotal: $448.25\nTax: $38.98\nTOTAL: $487.23",
    },
    SampleInvoice {
        filename: "travel_hotel_003.pdf",
        invoice_number: "HTL-789123",
        date: "2024-01-25",
        vendor: "Grand Plaza Hotel",
        total_cents: 63450,
        tax_cents: 8460,
        category: "Travel",
        items: &[("Hotel Room - Executive Suite", 54990, 3), ("Room Service", 8460, 1)],
        confidence: 94.1,
        text: "GRAND PLAZA HOTEL\nInvoice Number: HTL-789123\nGuest: Business Traveler\n\
               Check-in: 01/22/2024\nCheck-out: 01/25/2024\nRoom Type: Executive Suite\n\
               3 nights x $183.30 = $549.90\nRoom Service: $84.60\nTax: $84.60\nTOTAL AMOUNT: $634.50",
    },
    SampleInvoice {
        filename: "software_license_004.pdf",
        invoice_number: "SW-2024-456",
        date: "2024-02-01",
        vendor: "TechSoft Solutions LLC",
        total_cents: 129900,
        tax_cents: 10392,
        category: "Technology",
        items: &[("Annual Software License - Premium", 129900, 1)],
        confidence: 96.8,
        text: "TECHSOFT SOLUTIONS LLC\nSoftware License Invoice\nInvoice #: SW-2024-456\n\
               Date: February 1, 2024\nProduct: Premium Business Suite\nLicense Type: Annual\n\
               Users: 25\nAmount: $1,195.08\nTax (8%): $103.92\nTOTAL: $1,299.00",
    },
    SampleInvoice {
        filename: "catering_service_005.pdf",
        invoice_number: "CAT-567890",
        date: "2024-02-05",
        vendor: "Delicious Catering Co.",
        total_cents: 85675,
        tax_cents: 6854,
        category: "Meals & Entertainment",
        items: &[("Corporate Lunch Buffet", 75000, 50), ("Service Fee", 3821, 1)],
        confidence: 93.4,
        text: "DELICIOUS CATERING CO.\nCorporate Event Catering\nInvoice: CAT-567890\n\
               Event Date: 02/05/2024\nService: Corporate Lunch Buffet\nGuests: 50 people\n\
               Per Person: $15.00\nSubtotal: $750.00\nService Fee: $38.21\nTax: $68.54\nTOTAL: $856.75",
    },
    SampleInvoice {
        filename: "maintenance_repair_006.pdf",
        invoice_number: "MNT-234567",
        date: "2024-02-10",
        vendor: "Reliable Maintenance Services",
        total_cents: 32500,
        tax_cents: 2600,
        category: "Maintenance",
        items: &[("HVAC System Maintenance", 20000, 1), ("Air Filter Replacement", 9900, 4)],
        confidence: 91.6,
        text: "RELIABLE MAINTENANCE SERVICES\nWork Order: MNT-234567\nService Date: February 10, 2024\n\
               HVAC System Maintenance - $200.00\nAir Filter Replacement (4 units) - $99.00\n\
               Subtotal: $299.00\nTax: $26.00\nTOTAL: $325.00",
    },
];

impl SampleInvoice {
    fn to_processed(&self, processed_at: NaiveDateTime) -> ProcessedInvoice {
        let record = InvoiceRecord {
            invoice_number: self.invoice_number.to_string(),
            date: self.date.to_string(),
            vendor: self.vendor.to_string(),
            total_amount: Decimal::new(self.total_cents, 2),
            tax_amount: Decimal::new(self.tax_cents, 2),
            items: self
                .items
                .iter()
                .map(|(description, cents, quantity)| {
                    LineItem::new(*description, Decimal::new(*cents, 2), *quantity)
                })
                .collect(),
            category: self.category.to_string(),
            confidence: self.confidence,
        };

        ProcessedInvoice::new(self.filename, record, processed_at).with_extracted_text(self.text)
    }
}

/// Six curated invoices across different categories, stamped with
/// `processed_at`.
pub fn sample_invoices(processed_at: NaiveDateTime) -> Vec<ProcessedInvoice> {
    SAMPLES.iter().map(|s| s.to_processed(processed_at)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::{aggregate, suggest_cost_savings};
    use crate::invoice::{InvoiceAnalyzer, InvoiceExtractor};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn processed_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_sample_set() {
        let samples = sample_invoices(processed_at());
        assert_eq!(samples.len(), 6);
        assert!(samples.iter().all(|s| s.processed_date == "2024-03-01 09:30:00"));
        assert!(samples.iter().all(|s| s.extracted_text.is_some()));
        assert_eq!(samples[2].record.items[0].unit_price, Decimal::new(18330, 2));
    }

    #[test]
    fn test_sample_insights() {
        let samples = sample_invoices(processed_at());
        let insights = aggregate(&samples);

        assert_eq!(insights.invoice_count, 6);
        assert_eq!(insights.total_spending, Decimal::new(384815, 2));
        assert_eq!(insights.highest_invoice, Decimal::new(129900, 2));
        assert_eq!(insights.top_category.as_deref(), Some("Technology"));
        assert_eq!(insights.top_vendor.as_deref(), Some("TechSoft Solutions LLC"));
        assert_eq!(insights.total_tax, Decimal::new(34169, 2));
        assert_eq!(insights.most_frequent_vendor.as_deref(), Some("City Electric Company"));

        let suggestions = suggest_cost_savings(&samples);
        assert_eq!(
            suggestions,
            vec![
                "Consider reviewing Technology expenses ($1,299.00 total)".to_string(),
                "Review high-value invoices ($1299.00+ range)".to_string(),
            ]
        );
    }

    #[test]
    fn test_sample_totals_reextract() {
        let analyzer = InvoiceAnalyzer::new();
        for sample in sample_invoices(processed_at()) {
            let text = sample.extracted_text.as_deref().unwrap();
            assert_eq!(analyzer.analyze(text).total_amount, sample.record.total_amount);
        }
    }
}
