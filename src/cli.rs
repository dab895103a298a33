//! CLI definitions for orilabel
//!
//! The clap structure lives in the library so integration tests can parse
//! arguments without spawning the binary.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Build clap styles using the theme accent.
///
/// - Red: headers, usage, command names (accent color)
/// - White: descriptions, placeholders
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Red.on_default() | Effects::BOLD)
        .usage(AnsiColor::Red.on_default() | Effects::BOLD)
        .literal(AnsiColor::Red.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Yellow.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "orilabel")]
#[command(about = "[ orilabel ] - tag a folder of scanned pages as portrait or landscape")]
#[command(
    long_about = "orilabel - step through a folder of images and tag each one as portrait or landscape.

Images are shown one at a time in the terminal. Upcoming images are decoded
in the background so stepping forward stays instant. When the last image is
labeled the results are written as a JSON map of filename to orientation.

QUICK START:
    orilabel label ./scans                 Label every image in ./scans
    orilabel scan ./scans                  List the images that would be shown
    orilabel manifest --images ./scans \\
        --labels data/orientations.json \\
        --transcripts ./text               Build an OCR manifest

KEYS (while labeling):
    p       Portrait
    l       Landscape
    s       Retry saving after a write failure
    q, Esc  Quit without saving"
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Use this config file instead of ~/.config/orilabel/config.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Label every image in a folder
    #[command(long_about = "Open the interactive labeler on a folder of images.

Images are visited in filename order. Press 'p' for portrait or 'l' for
landscape; each keypress records the label and moves to the next image.
The labels file is written when the last image has been labeled.

EXAMPLES:
    orilabel label ./scans
    orilabel label ./scans --output out/labels.json
    orilabel label ./scans --window 40 --margin 10")]
    Label {
        /// Folder containing the images
        #[arg(help = "Folder containing the images to label")]
        folder: PathBuf,
        /// Where to write the labels (overrides config)
        #[arg(long, short, help = "Output JSON path (overrides config)")]
        output: Option<PathBuf>,
        /// Images decoded per background job (overrides config)
        #[arg(long, help = "Prefetch window size (overrides config)")]
        window: Option<usize>,
        /// Passed images kept cached behind the cursor (overrides config)
        #[arg(long, help = "Eviction margin (overrides config)")]
        margin: Option<usize>,
    },

    /// List the images a folder would present
    #[command(long_about = "Print the images in a folder in the order the labeler visits them.

EXAMPLE:
    orilabel scan ./scans")]
    Scan {
        /// Folder to scan
        #[arg(help = "Folder to scan")]
        folder: PathBuf,
    },

    /// Build an OCR training manifest from labels and transcripts
    #[command(long_about = "Combine images, orientation labels and transcripts into a manifest.

Each image is paired with '<stem>.txt' in the transcripts folder and with its
label. Images that cannot be opened, or that have no transcript, are listed
in the failed file instead.

EXAMPLE:
    orilabel manifest --images ./scans --labels data/orientations.json \\
        --transcripts ./text --url-prefix https://cdn.example/scans")]
    Manifest {
        /// Folder containing the images
        #[arg(long, help = "Folder containing the images")]
        images: PathBuf,
        /// Labels JSON written by 'orilabel label'
        #[arg(long, help = "Labels JSON produced by 'orilabel label'")]
        labels: PathBuf,
        /// Folder containing '<stem>.txt' transcripts
        #[arg(long, help = "Folder containing <stem>.txt transcripts")]
        transcripts: PathBuf,
        /// Prefix joined with each filename to form its URL
        #[arg(long, default_value = "", help = "URL prefix for each image")]
        url_prefix: String,
        /// Manifest output path
        #[arg(long, short, default_value = "data/manifest.json")]
        output: PathBuf,
        /// Failed filenames output path
        #[arg(long, default_value = "data/failed_images.txt")]
        failed: PathBuf,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
}
