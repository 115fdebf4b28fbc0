//! Keyword-based spending categorization.

use crate::models::invoice::UNCATEGORIZED;

/// Category taxonomy with its keywords, in tie-break order.
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Office Supplies",
        &["paper", "pen", "pencil", "stapler", "folder", "binder", "office", "supplies", "stationery"],
    ),
    (
        "Utilities",
        &["electricity", "gas", "water", "internet", "phone", "utility", "power", "energy", "telecom"],
    ),
    (
        "Travel",
        &["hotel", "flight", "taxi", "uber", "lyft", "airline", "travel", "accommodation", "transport"],
    ),
    (
        "Meals & Entertainment",
        &["restaurant", "cafe", "food", "meal", "lunch", "dinner", "catering", "entertainment"],
    ),
    (
        "Technology",
        &["computer", "laptop", "software", "hardware", "tech", "system", "device"],
    ),
    (
        "Professional Services",
        &["consulting", "legal", "accounting", "professional", "service", "advisory"],
    ),
    (
        "Marketing",
        &["advertising", "marketing", "promotion", "social media", "campaign", "branding"],
    ),
    (
        "Maintenance",
        &["repair", "maintenance", "cleaning", "janitorial", "fix", "service"],
    ),
    (
        "Insurance",
        &["insurance", "premium", "coverage", "policy", "liability"],
    ),
    (
        "Equipment",
        &["equipment", "machinery", "tools", "furniture", "fixture"],
    ),
];

/// Number of keywords of each category present in `text`, in table order.
pub fn category_scores(text: &str) -> Vec<(&'static str, usize)> {
    let lower = text.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .map(|(category, keywords)| {
            let score = keywords.iter().filter(|k| lower.contains(*k)).count();
            (*category, score)
        })
        .collect()
}

/// Highest-scoring category. Ties go to the category declared first;
/// no keyword at all gives [`UNCATEGORIZED`].
pub fn categorize(text: &str) -> &'static str {
    let mut best: Option<(&'static str, usize)> = None;

    for (category, score) in category_scores(text) {
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((category, score));
        }
    }

    best.map_or(UNCATEGORIZED, |(category, _)| category)
}
