//! Manifest command handler

use anyhow::{Context, Result};
use std::path::Path;

use orilabel::{build_manifest, ManifestInputs};

/// Build the OCR manifest and report how many images passed.
#[cfg(not(tarpaulin_include))]
pub fn handle(inputs: ManifestInputs, output: &Path, failed: &Path) -> Result<()> {
    let summary = build_manifest(&inputs, output, failed)
        .with_context(|| format!("Failed to build manifest from {}", inputs.images.display()))?;

    println!("Processed: {} images", summary.processed);
    println!("Failed: {} images", summary.failed);
    if summary.failed > 0 {
        println!("Failed names written to {}", failed.display());
    }
    Ok(())
}
