//! Clear command - empty a batch file.

use std::path::PathBuf;

use clap::Args;
use console::style;

use crate::store;

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Batch file
    #[arg(required = true)]
    batch: PathBuf,
}

pub async fn run(args: ClearArgs) -> anyhow::Result<()> {
    let mut batch = store::load_batch(&args.batch)?;
    let removed = batch.len();

    batch.clear();
    store::save_batch(&args.batch, &batch)?;

    println!(
        "{} Cleared {} invoices from {}",
        style("✓").green(),
        removed,
        args.batch.display()
    );

    Ok(())
}
