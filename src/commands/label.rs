//! Label command handler

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use orilabel::tui::{self, LabelOutcome};
use orilabel::{scan_folder, Config, ImageDecoder, ReviewSession};

/// Command-line overrides for a labeling run.
pub struct LabelArgs {
    pub output: Option<PathBuf>,
    pub window: Option<usize>,
    pub margin: Option<usize>,
}

/// Open the labeler on `folder`.
///
/// An empty folder prints a message and exits without touching the output.
#[cfg(not(tarpaulin_include))]
pub fn handle(config: &Config, folder: &Path, args: LabelArgs) -> Result<()> {
    let mut config = config.clone();
    if let Some(window) = args.window {
        config.prefetch.window_size = window;
    }
    if let Some(margin) = args.margin {
        config.prefetch.evict_margin = margin;
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid options: {}", e))?;

    let sequence = scan_folder(folder, &config.scan.extensions)
        .with_context(|| format!("Failed to scan {}", folder.display()))?;
    if sequence.is_empty() {
        println!("No images found in {}", folder.display());
        return Ok(());
    }

    let bounds = config.bounds();
    let decoder = ImageDecoder::new(sequence.root(), bounds).with_filter(config.display.filter);
    let session = ReviewSession::new(sequence, Arc::new(decoder), config.policy(), bounds);
    let output = args.output.unwrap_or_else(|| config.labels_path());

    match tui::run(session, output)? {
        LabelOutcome::Saved { path, labeled } => {
            println!("Saved {} labels to {}", labeled, path.display());
        }
        LabelOutcome::Quit { labeled, total } => {
            println!(
                "Stopped after {} of {} images. No labels were saved.",
                labeled, total
            );
        }
    }
    Ok(())
}
