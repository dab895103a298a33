//! Folder scanning
//!
//! Turns a directory into the ordered, immutable sequence of image file
//! names the review session steps through.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

/// Image extensions recognized by default (matched case-insensitively).
pub const DEFAULT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tiff", "tif"];

/// Errors that can occur while scanning a folder.
#[derive(Debug, thiserror::Error)]
pub enum FolderError {
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Ordered list of item identifiers (file names) under a root folder.
///
/// Fixed for the duration of one review session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    root: PathBuf,
    items: Arc<[String]>,
}

impl Sequence {
    pub fn new(root: impl Into<PathBuf>, items: Vec<String>) -> Self {
        Self {
            root: root.into(),
            items: items.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Shared handle to the item list, for handing to worker threads.
    pub fn shared_items(&self) -> Arc<[String]> {
        Arc::clone(&self.items)
    }

    pub fn path_of(&self, index: usize) -> Option<PathBuf> {
        self.get(index).map(|name| self.root.join(name))
    }
}

/// Check whether a file name ends in one of `extensions` (case-insensitive).
pub fn has_extension<S: AsRef<str>>(name: &str, extensions: &[S]) -> bool {
    let Some(ext) = Path::new(name).extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|allowed| allowed.as_ref().trim_start_matches('.').eq_ignore_ascii_case(ext))
}

/// List the image files directly inside `dir`, sorted by name.
///
/// Subdirectories and files with other extensions are ignored, as are
/// names that are not valid UTF-8.
pub fn scan_folder<S: AsRef<str>>(dir: &Path, extensions: &[S]) -> Result<Sequence, FolderError> {
    if !dir.is_dir() {
        return Err(FolderError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let read_err = |source| FolderError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut items = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            debug!(path = ?entry.path(), "skipping non UTF-8 file name");
            continue;
        };
        if has_extension(&name, extensions) {
            items.push(name);
        }
    }
    items.sort();

    debug!(folder = %dir.display(), count = items.len(), "scanned image folder");
    Ok(Sequence::new(dir, items))
}
