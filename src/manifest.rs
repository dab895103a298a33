//! OCR manifest assembly
//!
//! Pairs every image in a folder with its orientation label and its
//! transcript (`<stem>.txt`), and writes the result as a JSON array. Items
//! that fail any check are collected by name instead of aborting the run.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::files::{read_json, write_json, write_lines, FileError};
use crate::folder::{scan_folder, FolderError};
use crate::labels::Orientation;

/// Image extensions the manifest builder accepts (case-insensitive).
pub const MANIFEST_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff"];

/// One validated training record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OcrRecord {
    pub name: String,
    pub url: String,
    pub orientation: Orientation,
    pub transcript: String,
}

/// Why a single image was left out of the manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("cannot open image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot read transcript {path}: {source}")]
    Transcript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no orientation label for {name}")]
    MissingLabel { name: String },
}

/// Errors that stop the whole run before any item is processed.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Folder(#[from] FolderError),

    #[error(transparent)]
    File(#[from] FileError),
}

/// Inputs for one manifest run.
#[derive(Debug, Clone)]
pub struct ManifestInputs {
    pub images: PathBuf,
    pub labels: PathBuf,
    pub transcripts: PathBuf,
    pub url_prefix: String,
}

/// Records that passed and names that did not, both in filename order.
#[derive(Debug, Default)]
pub struct ManifestOutput {
    pub records: Vec<OcrRecord>,
    pub failed: Vec<String>,
}

/// Counts reported after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Join `prefix` and `name` with a single `/`.
pub fn image_url(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}

fn transcript_path(dir: &Path, name: &str) -> PathBuf {
    let stem = Path::new(name)
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    let mut file = stem;
    file.push(".txt");
    dir.join(file)
}

fn build_record(
    inputs: &ManifestInputs,
    labels: &HashMap<String, String>,
    name: &str,
) -> Result<OcrRecord, ManifestError> {
    let path = inputs.images.join(name);
    image::open(&path).map_err(|source| ManifestError::Image {
        path: path.clone(),
        source,
    })?;

    let transcript_path = transcript_path(&inputs.transcripts, name);
    let transcript =
        fs::read_to_string(&transcript_path).map_err(|source| ManifestError::Transcript {
            path: transcript_path,
            source,
        })?;

    let label = labels.get(name).ok_or_else(|| ManifestError::MissingLabel {
        name: name.to_string(),
    })?;

    Ok(OcrRecord {
        name: name.to_string(),
        url: image_url(&inputs.url_prefix, name),
        orientation: Orientation::from_label(label),
        transcript,
    })
}

/// Validate every image and collect records and failures.
pub fn collect_records(inputs: &ManifestInputs) -> Result<ManifestOutput, SetupError> {
    let labels: HashMap<String, String> = read_json(&inputs.labels)?;
    let sequence = scan_folder(&inputs.images, MANIFEST_EXTENSIONS)?;

    let results: Vec<(String, Result<OcrRecord, ManifestError>)> = sequence
        .items()
        .par_iter()
        .map(|name| (name.clone(), build_record(inputs, &labels, name)))
        .collect();

    let mut output = ManifestOutput::default();
    for (name, result) in results {
        match result {
            Ok(record) => output.records.push(record),
            Err(e) => {
                warn!(item = %name, error = %e, "skipping image");
                output.failed.push(name);
            }
        }
    }
    Ok(output)
}

/// Build the manifest and write it plus the failed list.
pub fn build_manifest(
    inputs: &ManifestInputs,
    manifest_path: &Path,
    failed_path: &Path,
) -> Result<ManifestSummary, SetupError> {
    let output = collect_records(inputs)?;
    write_json(manifest_path, &output.records)?;
    write_lines(failed_path, &output.failed)?;

    let summary = ManifestSummary {
        processed: output.records.len(),
        failed: output.failed.len(),
    };
    info!(
        processed = summary.processed,
        failed = summary.failed,
        manifest = %manifest_path.display(),
        "manifest written"
    );
    Ok(summary)
}
