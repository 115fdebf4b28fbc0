//! Process command - extract data from a single invoice file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use tally_core::invoice::{InvoiceAnalyzer, InvoiceExtractor};
use tally_core::models::config::SourceConfig;
use tally_core::models::invoice::ProcessedInvoice;

use super::load_config;
use crate::output::{format_invoice, OutputFormat};
use crate::source;
use crate::store;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show extraction confidence and missing fields
    #[arg(long)]
    show_confidence: bool,

    /// Append the result to a batch file
    #[arg(long, value_name = "BATCH")]
    append: Option<PathBuf>,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);

    pb.set_message("Reading text...");
    let text = source::load_text(&args.input, &config.source)?;

    pb.set_message("Extracting invoice data...");
    let analyzer = InvoiceAnalyzer::from_config(&config.extraction);
    let result = analyzer.extract(&text);

    pb.finish_and_clear();

    let invoice = ProcessedInvoice::new(
        display_name(&args.input),
        result.record,
        Local::now().naive_local(),
    );

    let output = format_invoice(&invoice, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if let Some(batch_path) = &args.append {
        let mut batch = store::load_batch(batch_path)?;
        batch.push(invoice.clone().with_extracted_text(text));
        store::save_batch(batch_path, &batch)?;
        eprintln!(
            "{} Appended to {} ({} invoices)",
            style("✓").green(),
            batch_path.display(),
            batch.len()
        );
    }

    if args.show_confidence {
        eprintln!();
        eprintln!(
            "{} Extraction confidence: {:.1}%",
            style("ℹ").blue(),
            invoice.record.confidence
        );
        eprintln!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            result.processing_time_ms
        );
        for warning in &result.warnings {
            eprintln!("  {} {}", style("-").yellow(), warning);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Read, clean and analyze one file. Returns the record and the text it was
/// extracted from.
pub(crate) fn analyze_file(
    path: &Path,
    analyzer: &InvoiceAnalyzer,
    source_config: &SourceConfig,
    processed_at: NaiveDateTime,
) -> anyhow::Result<(ProcessedInvoice, String)> {
    let text = source::load_text(path, source_config)?;
    let record = analyzer.analyze(&text);
    Ok((ProcessedInvoice::new(display_name(path), record, processed_at), text))
}

/// File name used to label an invoice.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}
