//! Unit tests for config module

use orilabel::{Config, PrefetchPolicy, ResizeFilter};
use tempfile::TempDir;

use crate::helpers::write_config;

#[test]
fn default_config_has_expected_values() {
    let config = Config::default();
    assert_eq!(config.prefetch.window_size, 20);
    assert_eq!(config.prefetch.evict_margin, 5);
    assert!(config.prefetch.refill_threshold.is_none());
    assert_eq!(config.display.max_width, 780);
    assert_eq!(config.display.max_height, 430);
    assert_eq!(config.display.filter, ResizeFilter::Lanczos3);
    assert!(config.scan.extensions.contains(&"png".to_string()));
    assert_eq!(config.output.labels_path, "data/orientations.json");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn default_policy_refills_at_half_window() {
    let policy = Config::default().policy();
    assert_eq!(policy, PrefetchPolicy::default());
    assert_eq!(policy.refill_threshold, 10);
}

#[test]
fn config_serialization_roundtrip() {
    let config = Config::default();
    let toml_str = config.to_toml().unwrap();
    let parsed: Config = toml::from_str(&toml_str).unwrap();
    assert_eq!(parsed.prefetch.window_size, config.prefetch.window_size);
    assert_eq!(parsed.display.filter, config.display.filter);
    assert_eq!(parsed.scan.extensions, config.scan.extensions);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let temp = TempDir::new().unwrap();
    let path = write_config(
        &temp,
        r#"
[prefetch]
window_size = 8
refill_threshold = 3

[display]
filter = "catmull-rom"
"#,
    );
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.prefetch.window_size, 8);
    assert_eq!(config.prefetch.evict_margin, 5);
    assert_eq!(config.policy().refill_threshold, 3);
    assert_eq!(config.display.filter, ResizeFilter::CatmullRom);
    assert_eq!(config.display.max_width, 780);
}

#[test]
fn missing_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
    assert_eq!(config.prefetch.window_size, 20);
}

#[test]
fn zero_window_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "[prefetch]\nwindow_size = 0\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Invalid config"));
}

#[test]
fn refill_threshold_above_window_is_rejected() {
    let mut config = Config::default();
    config.prefetch.refill_threshold = Some(21);
    assert!(config.validate().is_err());
    config.prefetch.refill_threshold = Some(20);
    assert!(config.validate().is_ok());
}

#[test]
fn unknown_filter_name_fails_to_parse() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "[display]\nfilter = \"bicubic-ish\"\n");
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn zero_display_bounds_are_rejected() {
    let mut config = Config::default();
    config.display.max_height = 0;
    assert!(config.validate().is_err());
}

#[test]
fn empty_extension_list_is_rejected() {
    let mut config = Config::default();
    config.scan.extensions.clear();
    assert!(config.validate().is_err());
}

#[test]
fn bounds_follow_display_section() {
    let mut config = Config::default();
    config.display.max_width = 100;
    config.display.max_height = 50;
    let bounds = config.bounds();
    assert_eq!((bounds.width, bounds.height), (100, 50));
}

#[test]
fn labels_path_expands_home() {
    let mut config = Config::default();
    config.output.labels_path = "~/labels/out.json".to_string();
    let path = config.labels_path();
    assert!(!path.to_string_lossy().starts_with('~'));
    assert!(path.ends_with("labels/out.json"));
}

#[test]
fn relative_labels_path_is_unchanged() {
    let config = Config::default();
    assert_eq!(
        config.labels_path(),
        std::path::PathBuf::from("data/orientations.json")
    );
}
