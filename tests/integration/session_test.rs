//! Review sessions against real image files

use std::fs;

use orilabel::prefetch::{LoaderJob, LoaderState};
use orilabel::{AssetSource, Orientation, PrefetchPolicy, Step};
use tempfile::TempDir;

use crate::helpers::{image_folder, image_name, session_for, wait_for_loader, write_corrupt, write_png};

#[test]
fn refill_starts_at_half_window_and_evicts_behind_margin() {
    let folder = image_folder(20);
    let mut session = session_for(folder.path(), PrefetchPolicy::default());
    assert_eq!(session.supervisor().current_job(), Some(LoaderJob::new(0, 20)));

    session.present().unwrap();
    for _ in 0..10 {
        session.advance(Orientation::Portrait).unwrap();
    }

    assert_eq!(session.cursor(), 10);
    assert_eq!(session.supervisor().jobs_started(), 2);
    assert_eq!(session.supervisor().current_job(), Some(LoaderJob::new(20, 20)));
    // Nothing left to decode past the end of the folder
    assert_eq!(session.supervisor().active_state(), LoaderState::Completed);
    assert!(session.cache().indices().iter().all(|&i| i >= 5));
}

#[test]
fn corrupt_file_falls_back_to_placeholder_and_session_completes() {
    let folder = TempDir::new().unwrap();
    for i in 0..6 {
        if i == 3 {
            write_corrupt(folder.path(), &image_name(i));
        } else {
            write_png(folder.path(), &image_name(i), 12, 24);
        }
    }
    let mut session = session_for(folder.path(), PrefetchPolicy::default());
    wait_for_loader(&session);
    assert!(!session.is_cached(3));

    session.present().unwrap();
    let mut sources = Vec::new();
    loop {
        match session.advance(Orientation::Landscape).unwrap() {
            Step::Next(p) => sources.push((p.index, p.source)),
            Step::Finished => break,
        }
    }

    assert_eq!(sources[2], (3, AssetSource::Unavailable));
    assert!(sources
        .iter()
        .filter(|(i, _)| *i != 3)
        .all(|(_, s)| *s == AssetSource::CacheHit));
    assert!(session.is_finished());
    assert_eq!(session.labels().len(), 6);
}

#[test]
fn empty_folder_finishes_immediately() {
    let folder = TempDir::new().unwrap();
    fs::write(folder.path().join("readme.txt"), "no images here").unwrap();

    let mut session = session_for(folder.path(), PrefetchPolicy::default());

    assert!(session.is_finished());
    assert!(session.labels().is_empty());
    assert_eq!(session.supervisor().jobs_started(), 0);
    assert!(session.present().is_none());
}

#[test]
fn labeling_everything_portrait_writes_complete_map() {
    let folder = image_folder(7);
    let out = TempDir::new().unwrap();
    let path = out.path().join("orientations.json");
    let mut session = session_for(folder.path(), PrefetchPolicy::new(3, 1));

    session.present().unwrap();
    while !session.is_finished() {
        session.advance(Orientation::Portrait).unwrap();
    }
    session.save_labels(&path).unwrap();

    let written: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written.len(), 7);
    assert!(written.values().all(|v| v == "portrait"));
    assert!(written.contains_key(&image_name(6)));
}

#[test]
fn decoded_assets_fit_display_bounds_and_keep_source_size() {
    let folder = TempDir::new().unwrap();
    write_png(folder.path(), "wide.png", 64, 16);
    let mut session = session_for(folder.path(), PrefetchPolicy::default());

    let shown = session.present().unwrap();

    assert_eq!(shown.asset.source_dimensions(), (64, 16));
    assert!(shown.asset.width() <= 16);
    assert!(shown.asset.height() <= 16);
    assert!(!shown.asset.is_portrait());
}

#[test]
fn small_window_keeps_cache_bounded() {
    let folder = image_folder(30);
    let policy = PrefetchPolicy::new(4, 2);
    let mut session = session_for(folder.path(), policy);

    session.present().unwrap();
    while !session.is_finished() {
        wait_for_loader(&session);
        session.advance(Orientation::Landscape).unwrap();
        assert!(session.cache().len() <= policy.max_resident());
    }
    assert!(session.cache().is_empty());
}
