//! Unit tests for OCR manifest assembly

use std::fs;

use orilabel::manifest::{collect_records, SetupError};
use orilabel::{build_manifest, ManifestInputs, Orientation};
use tempfile::TempDir;

use crate::helpers::{write_corrupt, write_png};

struct Fixture {
    _temp: TempDir,
    inputs: ManifestInputs,
}

fn fixture(labels: &str) -> Fixture {
    let temp = TempDir::new().unwrap();
    let images = temp.path().join("images");
    let transcripts = temp.path().join("text");
    fs::create_dir_all(&images).unwrap();
    fs::create_dir_all(&transcripts).unwrap();
    let labels_path = temp.path().join("labels.json");
    fs::write(&labels_path, labels).unwrap();

    Fixture {
        inputs: ManifestInputs {
            images,
            labels: labels_path,
            transcripts,
            url_prefix: "https://cdn.example/b1".to_string(),
        },
        _temp: temp,
    }
}

#[test]
fn valid_images_become_records_in_name_order() {
    let f = fixture(r#"{"b.png": "portrait", "a.png": "landscape"}"#);
    write_png(&f.inputs.images, "b.png", 3, 5);
    write_png(&f.inputs.images, "a.png", 5, 3);
    fs::write(f.inputs.transcripts.join("a.txt"), "alpha").unwrap();
    fs::write(f.inputs.transcripts.join("b.txt"), "beta").unwrap();

    let output = collect_records(&f.inputs).unwrap();

    assert!(output.failed.is_empty());
    let names: Vec<_> = output.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["a.png", "b.png"]);
    assert_eq!(output.records[0].orientation, Orientation::Landscape);
    assert_eq!(output.records[1].orientation, Orientation::Portrait);
    assert_eq!(output.records[1].url, "https://cdn.example/b1/b.png");
    assert_eq!(output.records[1].transcript, "beta");
}

#[test]
fn unrecognized_label_counts_as_landscape() {
    let f = fixture(r#"{"a.png": "sideways"}"#);
    write_png(&f.inputs.images, "a.png", 2, 2);
    fs::write(f.inputs.transcripts.join("a.txt"), "").unwrap();

    let output = collect_records(&f.inputs).unwrap();

    assert_eq!(output.records[0].orientation, Orientation::Landscape);
}

#[test]
fn bad_items_are_collected_not_fatal() {
    let f = fixture(r#"{"good.png": "portrait", "corrupt.png": "portrait", "notext.png": "portrait"}"#);
    write_png(&f.inputs.images, "good.png", 2, 2);
    write_corrupt(&f.inputs.images, "corrupt.png");
    write_png(&f.inputs.images, "notext.png", 2, 2);
    write_png(&f.inputs.images, "unlabeled.png", 2, 2);
    for stem in ["good", "corrupt", "unlabeled"] {
        fs::write(f.inputs.transcripts.join(format!("{}.txt", stem)), "t").unwrap();
    }

    let output = collect_records(&f.inputs).unwrap();

    assert_eq!(output.records.len(), 1);
    assert_eq!(output.records[0].name, "good.png");
    assert_eq!(output.failed, ["corrupt.png", "notext.png", "unlabeled.png"]);
}

#[test]
fn build_writes_manifest_and_failed_list() {
    let f = fixture(r#"{"a.png": "portrait"}"#);
    write_png(&f.inputs.images, "a.png", 2, 2);
    write_corrupt(&f.inputs.images, "b.tif");
    fs::write(f.inputs.transcripts.join("a.txt"), "text").unwrap();
    let out_dir = f.inputs.images.parent().unwrap().join("data");
    let manifest_path = out_dir.join("manifest.json");
    let failed_path = out_dir.join("failed.txt");

    let summary = build_manifest(&f.inputs, &manifest_path, &failed_path).unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed, 1);
    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();
    assert_eq!(manifest[0]["name"], "a.png");
    assert_eq!(manifest[0]["orientation"], "portrait");
    assert_eq!(fs::read_to_string(&failed_path).unwrap(), "b.tif\n");
}

#[test]
fn unreadable_label_file_is_a_setup_error() {
    let f = fixture("not json");
    let err = collect_records(&f.inputs).unwrap_err();
    assert!(matches!(err, SetupError::File(_)));
}
