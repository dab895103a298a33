//! Configuration management for orilabel
//!
//! Settings live in `~/.config/orilabel/config.toml`. Every field has a
//! default, so a missing file or a partial file is fine.

mod io;
mod types;

pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::asset::Bounds;
use crate::prefetch::PrefetchPolicy;

impl Config {
    /// Get the config file path (~/.config/orilabel/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Get the config directory path (~/.config/orilabel)
    pub fn config_dir() -> Result<PathBuf> {
        io::config_dir()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load()
    }

    /// Load configuration from a specific file, or return defaults if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        io::to_toml(self)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        let prefetch = &self.prefetch;
        if prefetch.window_size == 0 {
            return Err("prefetch.window_size must be at least 1".to_string());
        }
        if let Some(threshold) = prefetch.refill_threshold {
            if threshold > prefetch.window_size {
                return Err(format!(
                    "prefetch.refill_threshold ({}) cannot exceed prefetch.window_size ({})",
                    threshold, prefetch.window_size
                ));
            }
        }
        if self.display.max_width == 0 || self.display.max_height == 0 {
            return Err("display.max_width and display.max_height must be non-zero".to_string());
        }
        if self.scan.extensions.is_empty() {
            return Err("scan.extensions must list at least one extension".to_string());
        }
        Ok(())
    }

    /// Prefetch policy built from the `[prefetch]` section
    pub fn policy(&self) -> PrefetchPolicy {
        self.prefetch.policy()
    }

    /// Display box from the `[display]` section
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.display.max_width, self.display.max_height)
    }

    /// Expand ~ in the labels output path
    pub fn labels_path(&self) -> PathBuf {
        expand_home(&self.output.labels_path)
    }

    /// Expand ~ in the log directory path
    pub fn log_directory(&self) -> PathBuf {
        expand_home(&self.logging.directory)
    }
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
