//! Export command - write a batch as CSV.

use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::Args;
use console::style;

use crate::output::write_invoices_csv;
use crate::store;

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Batch file
    #[arg(required = true)]
    batch: PathBuf,

    /// Output CSV file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: ExportArgs) -> anyhow::Result<()> {
    let batch = store::load_existing_batch(&args.batch)?;

    if batch.is_empty() {
        anyhow::bail!("No invoice data available to export");
    }

    match &args.output {
        Some(path) => {
            write_invoices_csv(File::create(path)?, batch.invoices())?;
            println!(
                "{} Exported {} invoices to {}",
                style("✓").green(),
                batch.len(),
                path.display()
            );
        }
        None => write_invoices_csv(io::stdout().lock(), batch.invoices())?,
    }

    Ok(())
}
