//! Insights command - spending summary and suggestions for a batch.

use std::path::PathBuf;

use clap::Args;
use serde_json::json;

use tally_core::insights::InsightsAggregator;

use super::load_config;
use crate::output::format_insights_text;
use crate::store;

/// Arguments for the insights command.
#[derive(Args)]
pub struct InsightsArgs {
    /// Batch file
    #[arg(required = true)]
    batch: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: InsightsFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum InsightsFormat {
    /// Plain text report
    Text,
    /// JSON object with `insights` and `suggestions`
    Json,
}

pub async fn run(args: InsightsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let batch = store::load_existing_batch(&args.batch)?;

    let aggregator = InsightsAggregator::from_config(&config.insights);
    let insights = aggregator.aggregate(batch.invoices());
    let suggestions = aggregator.suggest_cost_savings(batch.invoices());

    match args.format {
        InsightsFormat::Text => print!(
            "{}",
            format_insights_text(&insights, &suggestions, &config.insights.currency_symbol)
        ),
        InsightsFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "insights": insights,
                "suggestions": suggestions,
            }))?
        ),
    }

    Ok(())
}
