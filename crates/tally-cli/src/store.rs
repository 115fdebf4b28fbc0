//! Batch file persistence.

use std::fs;
use std::path::Path;

use tracing::debug;

use tally_core::models::batch::InvoiceBatch;

/// Load a batch file. A missing file is an empty batch.
pub fn load_batch(path: &Path) -> anyhow::Result<InvoiceBatch> {
    if !path.exists() {
        debug!("Batch file {} does not exist, starting empty", path.display());
        return Ok(InvoiceBatch::new());
    }

    let json = fs::read_to_string(path)?;
    let batch = InvoiceBatch::from_json(&json)
        .map_err(|e| anyhow::anyhow!("Failed to read batch {}: {}", path.display(), e))?;
    debug!("Loaded {} invoices from {}", batch.len(), path.display());
    Ok(batch)
}

/// Load a batch file that must already exist.
pub fn load_existing_batch(path: &Path) -> anyhow::Result<InvoiceBatch> {
    if !path.exists() {
        anyhow::bail!("Batch file not found: {}", path.display());
    }
    load_batch(path)
}

pub fn save_batch(path: &Path, batch: &InvoiceBatch) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, batch.to_json()?)?;
    debug!("Saved {} invoices to {}", batch.len(), path.display());
    Ok(())
}
