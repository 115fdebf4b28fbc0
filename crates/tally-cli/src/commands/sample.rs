//! Sample command - built-in demo invoices.

use std::path::PathBuf;

use chrono::Local;
use clap::Args;
use console::style;

use tally_core::sample::sample_invoices;

use crate::store;

/// Arguments for the sample command.
#[derive(Args)]
pub struct SampleArgs {
    /// Load the samples into a batch file instead of printing them
    #[arg(long, value_name = "BATCH")]
    append: Option<PathBuf>,
}

pub async fn run(args: SampleArgs) -> anyhow::Result<()> {
    let samples = sample_invoices(Local::now().naive_local());

    let Some(batch_path) = &args.append else {
        println!("{}", serde_json::to_string_pretty(&samples)?);
        return Ok(());
    };

    let count = samples.len();
    let mut batch = store::load_batch(batch_path)?;
    batch.extend(samples);
    store::save_batch(batch_path, &batch)?;

    println!(
        "{} Loaded {} sample invoices into {} ({} total)",
        style("✓").green(),
        count,
        batch_path.display(),
        batch.len()
    );

    Ok(())
}
