//! Unit tests for the label map and its output file

use std::fs;

use orilabel::{write_labels, LabelMap, Orientation};
use tempfile::TempDir;

#[test]
fn written_file_is_an_ordered_object() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("out").join("labels.json");
    let mut labels = LabelMap::new();
    labels.record("z.png", Orientation::Landscape);
    labels.record("a.png", Orientation::Portrait);

    write_labels(&labels, &path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "{\n  \"z.png\": \"landscape\",\n  \"a.png\": \"portrait\"\n}\n"
    );
}

#[test]
fn writing_into_a_file_path_fails() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    let labels = LabelMap::new();
    assert!(write_labels(&labels, &blocker.join("labels.json")).is_err());
}

#[test]
fn counts_per_orientation() {
    let mut labels = LabelMap::new();
    labels.record("a", Orientation::Portrait);
    labels.record("b", Orientation::Portrait);
    labels.record("c", Orientation::Landscape);
    assert_eq!(labels.count(Orientation::Portrait), 2);
    assert_eq!(labels.count(Orientation::Landscape), 1);
}
