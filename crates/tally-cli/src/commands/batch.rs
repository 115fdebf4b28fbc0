//! Batch processing command for multiple invoice files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, error, warn};

use tally_core::insights::InsightsAggregator;
use tally_core::invoice::InvoiceAnalyzer;
use tally_core::models::invoice::ProcessedInvoice;

use super::load_config;
use super::process::analyze_file;
use crate::output::{format_insights_text, format_invoice, OutputFormat};
use crate::source;
use crate::store;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Append successful results to a batch file
    #[arg(long, value_name = "BATCH")]
    save: Option<PathBuf>,

    /// Print spending insights for the processed files
    #[arg(long)]
    insights: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    outcome: Result<(ProcessedInvoice, String), String>,
    processing_time_ms: u64,
}

impl ProcessResult {
    fn invoice(&self) -> Option<&ProcessedInvoice> {
        self.outcome.as_ref().ok().map(|(invoice, _)| invoice)
    }

    fn error(&self) -> Option<&str> {
        self.outcome.as_ref().err().map(String::as_str)
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| source::is_supported(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.jobs.max(1))
        .build()?;

    let analyzer = InvoiceAnalyzer::from_config(&config.extraction);
    let processed_at = Local::now().naive_local();

    let results: Vec<ProcessResult> = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                let file_start = Instant::now();
                let outcome = analyze_file(path, &analyzer, &config.source, processed_at)
                    .map_err(|e| e.to_string());
                overall_pb.inc(1);

                ProcessResult {
                    path: path.clone(),
                    outcome,
                    processing_time_ms: file_start.elapsed().as_millis() as u64,
                }
            })
            .collect()
    });

    overall_pb.finish_with_message("Complete");

    if !args.continue_on_error {
        if let Some(failed) = results.iter().find(|r| r.error().is_some()) {
            let error_msg = failed.error().unwrap_or("unknown error");
            error!("Failed to process {}: {}", failed.path.display(), error_msg);
            anyhow::bail!("Processing failed: {}", error_msg);
        }
    }

    for result in &results {
        if let Some(error_msg) = result.error() {
            warn!("Failed to process {}: {}", result.path.display(), error_msg);
        }
    }

    // Write per-file outputs
    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            let Some(invoice) = result.invoice() else {
                continue;
            };

            let output_name = result.path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("invoice");
            let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            fs::write(&output_path, format_invoice(invoice, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args.output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful: Vec<&ProcessResult> = results.iter().filter(|r| r.invoice().is_some()).collect();
    let failed: Vec<&ProcessResult> = results.iter().filter(|r| r.error().is_some()).collect();

    if let Some(batch_path) = &args.save {
        let mut batch = store::load_batch(batch_path)?;
        batch.extend(results.iter().filter_map(|r| {
            r.outcome
                .as_ref()
                .ok()
                .map(|(invoice, text)| invoice.clone().with_extracted_text(text.clone()))
        }));
        store::save_batch(batch_path, &batch)?;
        println!(
            "{} Saved {} invoices to {} ({} total)",
            style("✓").green(),
            successful.len(),
            batch_path.display(),
            batch.len()
        );
    }

    if args.insights {
        let invoices: Vec<&ProcessedInvoice> = successful.iter().filter_map(|r| r.invoice()).collect();
        let aggregator = InsightsAggregator::from_config(&config.insights);
        println!();
        print!(
            "{}",
            format_insights_text(
                &aggregator.aggregate(&invoices),
                &aggregator.suggest_cost_savings(&invoices),
                &config.insights.currency_symbol,
            )
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "invoice_number",
        "date",
        "vendor",
        "category",
        "total_amount",
        "confidence",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(invoice) = result.invoice() {
            let record = &invoice.record;
            wtr.write_record([
                filename,
                "success",
                &record.invoice_number,
                &record.date,
                &record.vendor,
                &record.category,
                &record.total_amount.to_string(),
                &format!("{:.1}", record.confidence),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
