//! Test helper utilities

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use orilabel::{
    scan_folder, Bounds, ImageDecoder, PrefetchPolicy, ReviewSession, Sequence,
};
use tempfile::TempDir;

pub const TEST_BOUNDS: Bounds = Bounds::new(16, 16);

/// Write a solid-colour PNG of the given size.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let image = image::RgbImage::from_pixel(width, height, image::Rgb([30, 90, 160]));
    image.save(&path).expect("Failed to write test PNG");
    path
}

/// Write bytes that no image decoder accepts, under an image extension.
pub fn write_corrupt(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"\x89PNG but not really").expect("Failed to write corrupt file");
    path
}

/// Folder with `count` PNGs named img00.png, img01.png, ...
pub fn image_folder(count: usize) -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    for i in 0..count {
        write_png(temp.path(), &image_name(i), 24, 12);
    }
    temp
}

pub fn image_name(index: usize) -> String {
    format!("img{:02}.png", index)
}

pub fn scan(dir: &Path) -> Sequence {
    scan_folder(dir, orilabel::folder::DEFAULT_EXTENSIONS).expect("Failed to scan folder")
}

/// Session over `dir` decoding real files.
pub fn session_for(dir: &Path, policy: PrefetchPolicy) -> ReviewSession {
    let sequence = scan(dir);
    let decoder = ImageDecoder::new(dir, TEST_BOUNDS);
    ReviewSession::new(sequence, Arc::new(decoder), policy, TEST_BOUNDS)
}

/// Block until the active loader has stopped.
pub fn wait_for_loader(session: &ReviewSession) {
    for _ in 0..400 {
        if !session.supervisor().is_running() {
            return;
        }
        sleep(Duration::from_millis(5));
    }
    panic!("prefetch loader did not finish");
}
