//! JSON and line-oriented file I/O
//!
//! Output files are written with 2-space indentation and a trailing newline.
//! Parent directories are created as needed.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Errors from reading or writing output files.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl FileError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        FileError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn ensure_parent(path: &Path) -> Result<(), FileError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| FileError::io(parent, e))
        }
        _ => Ok(()),
    }
}

/// Serialize `value` as pretty JSON and write it to `path`.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), FileError> {
    let mut contents = serde_json::to_string_pretty(value).map_err(|source| FileError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    contents.push('\n');

    ensure_parent(path)?;
    fs::write(path, contents).map_err(|e| FileError::io(path, e))
}

/// Write one entry per line to `path`.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<(), FileError> {
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line.as_ref());
        contents.push('\n');
    }

    ensure_parent(path)?;
    fs::write(path, contents).map_err(|e| FileError::io(path, e))
}

/// Read and parse a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, FileError> {
    let contents = fs::read_to_string(path).map_err(|e| FileError::io(path, e))?;
    serde_json::from_str(&contents).map_err(|source| FileError::Json {
        path: path.to_path_buf(),
        source,
    })
}
