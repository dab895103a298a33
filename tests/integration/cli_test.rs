//! CLI smoke tests

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{write_corrupt, write_png};

fn orilabel(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("orilabel").unwrap();
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn scan_lists_images_in_order() {
    let home = TempDir::new().unwrap();
    let folder = TempDir::new().unwrap();
    write_png(folder.path(), "b.png", 2, 2);
    write_png(folder.path(), "a.png", 2, 2);
    fs::write(folder.path().join("notes.txt"), "x").unwrap();

    orilabel(&home)
        .arg("scan")
        .arg(folder.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a.png\nb.png\n"))
        .stdout(predicate::str::contains("2 images"));
}

#[test]
fn scan_of_missing_folder_fails() {
    let home = TempDir::new().unwrap();
    orilabel(&home)
        .arg("scan")
        .arg(home.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a directory"));
}

#[test]
fn label_on_empty_folder_writes_nothing() {
    let home = TempDir::new().unwrap();
    let folder = TempDir::new().unwrap();
    let output = home.path().join("labels.json");

    orilabel(&home)
        .arg("label")
        .arg(folder.path())
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("No images found"));

    assert!(!output.exists());
}

#[test]
fn label_rejects_zero_window() {
    let home = TempDir::new().unwrap();
    let folder = TempDir::new().unwrap();

    orilabel(&home)
        .arg("label")
        .arg(folder.path())
        .args(["--window", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("window_size"));
}

#[test]
fn config_path_points_into_home() {
    let home = TempDir::new().unwrap();
    orilabel(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".config/orilabel/config.toml"));
}

#[test]
fn config_show_reflects_override_file() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("custom.toml");
    fs::write(&config, "[prefetch]\nwindow_size = 12\n").unwrap();

    orilabel(&home)
        .args(["config", "show", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("window_size = 12"))
        .stdout(predicate::str::contains("labels_path"));
}

#[test]
fn invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("bad.toml");
    fs::write(&config, "[prefetch]\nwindow_size = 0\n").unwrap();

    orilabel(&home)
        .args(["config", "show", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn manifest_reports_processed_and_failed() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let images = work.path().join("images");
    let text = work.path().join("text");
    fs::create_dir_all(&images).unwrap();
    fs::create_dir_all(&text).unwrap();
    write_png(&images, "a.png", 2, 2);
    write_corrupt(&images, "b.png");
    fs::write(text.join("a.txt"), "hello").unwrap();
    fs::write(text.join("b.txt"), "world").unwrap();
    let labels = work.path().join("labels.json");
    fs::write(&labels, r#"{"a.png": "portrait", "b.png": "landscape"}"#).unwrap();
    let manifest = work.path().join("out").join("manifest.json");
    let failed = work.path().join("out").join("failed.txt");

    orilabel(&home)
        .arg("manifest")
        .arg("--images")
        .arg(&images)
        .arg("--labels")
        .arg(&labels)
        .arg("--transcripts")
        .arg(&text)
        .args(["--url-prefix", "https://cdn.example/b1"])
        .arg("--output")
        .arg(&manifest)
        .arg("--failed")
        .arg(&failed)
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed: 1 images"))
        .stdout(predicate::str::contains("Failed: 1 images"));

    let written = fs::read_to_string(&manifest).unwrap();
    assert!(written.contains("https://cdn.example/b1/a.png"));
    assert_eq!(fs::read_to_string(&failed).unwrap(), "b.png\n");
}
