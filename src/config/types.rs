//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use crate::asset::ResizeFilter;
use crate::folder::DEFAULT_EXTENSIONS;
use crate::prefetch::PrefetchPolicy;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub prefetch: PrefetchConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Sliding-window prefetch tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefetchConfig {
    /// Items decoded per background loader job
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Already-passed items kept in the cache behind the cursor
    #[serde(default = "default_evict_margin")]
    pub evict_margin: usize,
    /// Start the next window when this many covered items remain
    /// (defaults to half the window)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refill_threshold: Option<usize>,
}

fn default_window_size() -> usize {
    PrefetchPolicy::DEFAULT_WINDOW_SIZE
}

fn default_evict_margin() -> usize {
    PrefetchPolicy::DEFAULT_EVICT_MARGIN
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            evict_margin: default_evict_margin(),
            refill_threshold: None,
        }
    }
}

impl PrefetchConfig {
    /// Build the runtime policy from these settings.
    pub fn policy(&self) -> PrefetchPolicy {
        let policy = PrefetchPolicy::new(self.window_size, self.evict_margin);
        match self.refill_threshold {
            Some(threshold) => policy.with_refill_threshold(threshold),
            None => policy,
        }
    }
}

/// Display box images are scaled into
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_max_width")]
    pub max_width: u32,
    #[serde(default = "default_max_height")]
    pub max_height: u32,
    /// Resampling filter: nearest, triangle, catmull-rom, gaussian, lanczos3
    #[serde(default)]
    pub filter: ResizeFilter,
}

fn default_max_width() -> u32 {
    780
}

fn default_max_height() -> u32 {
    430
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_width: default_max_width(),
            max_height: default_max_height(),
            filter: ResizeFilter::default(),
        }
    }
}

/// Folder scanning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File extensions treated as images (case-insensitive)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

/// Where finished label maps are written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_labels_path")]
    pub labels_path: String,
}

fn default_labels_path() -> String {
    "data/orientations.json".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            labels_path: default_labels_path(),
        }
    }
}

/// Log file location and default level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_directory")]
    pub directory: String,
    #[serde(default = "default_log_file")]
    pub file: String,
    /// Used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_directory() -> String {
    "~/.local/state/orilabel".to_string()
}

fn default_log_file() -> String {
    "orilabel.log".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            file: default_log_file(),
            level: default_log_level(),
        }
    }
}
