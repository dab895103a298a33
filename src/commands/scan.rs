//! Scan command handler

use anyhow::{Context, Result};
use std::path::Path;

use orilabel::{scan_folder, Config};

/// Print the images in `folder` in review order.
#[cfg(not(tarpaulin_include))]
pub fn handle(config: &Config, folder: &Path) -> Result<()> {
    let sequence = scan_folder(folder, &config.scan.extensions)
        .with_context(|| format!("Failed to scan {}", folder.display()))?;

    if sequence.is_empty() {
        println!("No images found in {}", folder.display());
        return Ok(());
    }

    for name in sequence.items() {
        println!("{}", name);
    }
    println!();
    println!("{} images", sequence.len());
    Ok(())
}
