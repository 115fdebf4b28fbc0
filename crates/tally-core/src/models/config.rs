//! Configuration structures for extraction and insights.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TallyError};

/// Main configuration for the tally pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    /// Invoice extraction configuration.
    pub extraction: ExtractionConfig,

    /// Spending insights configuration.
    pub insights: InsightsConfig,

    /// Input text handling.
    pub source: SourceConfig,
}

/// Invoice extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of leading non-empty lines searched for a vendor name.
    pub vendor_scan_lines: usize,

    /// Parse line items from the invoice body.
    pub extract_line_items: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            vendor_scan_lines: 5,
            extract_line_items: true,
        }
    }
}

/// Spending insights configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsConfig {
    /// Quantile above which invoices count as high-value (0.0 - 1.0).
    pub high_value_quantile: f64,

    /// Currency symbol used in suggestions.
    pub currency_symbol: String,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            high_value_quantile: 0.9,
            currency_symbol: "$".to_string(),
        }
    }
}

/// Handling of text supplied by PDF or plain-text sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Normalize whitespace and strip stray characters before extraction.
    pub clean_text: bool,

    /// Minimum text length (in characters) to attempt extraction.
    pub min_text_length: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            clean_text: true,
            min_text_length: 1,
        }
    }
}

impl TallyConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.extraction.vendor_scan_lines == 0 {
            return Err(TallyError::Config(
                "extraction.vendor_scan_lines must be at least 1".to_string(),
            ));
        }

        let q = self.insights.high_value_quantile;
        if !(0.0..=1.0).contains(&q) {
            return Err(TallyError::Config(format!(
                "insights.high_value_quantile must be within 0.0..=1.0, got {}",
                q
            )));
        }

        Ok(())
    }
}
