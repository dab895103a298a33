//! Test helper utilities

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a solid-colour PNG of the given size.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let image = image::RgbImage::from_pixel(width, height, image::Rgb([200, 120, 40]));
    image.save(&path).expect("Failed to write test PNG");
    path
}

/// Write bytes that no image decoder accepts, under an image extension.
pub fn write_corrupt(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"definitely not an image").expect("Failed to write corrupt file");
    path
}

/// Write a config file into `temp_dir` and return its path.
pub fn write_config(temp_dir: &TempDir, contents: &str) -> PathBuf {
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, contents).expect("Failed to write config");
    path
}
