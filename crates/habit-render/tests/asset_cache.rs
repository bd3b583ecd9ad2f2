//! Illustration asset cache: idempotence and concurrent first use

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use habit_render::{Character, IllustrationAssets};

fn snapshot(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| {
            let e = e.unwrap();
            (e.file_name().to_string_lossy().into_owned(), fs::read(e.path()).unwrap())
        })
        .collect()
}

#[test]
fn test_second_materialization_is_byte_identical() {
    let dir = tempfile::TempDir::new().unwrap();
    let assets = IllustrationAssets::new(dir.path());

    assets.ensure_materialized().unwrap();
    let first = snapshot(dir.path());
    let report = assets.ensure_materialized().unwrap();
    let second = snapshot(dir.path());

    assert!(report.written.is_empty());
    assert_eq!(first, second);
    assert_eq!(first.len(), Character::assets().count());
}

#[test]
fn test_separate_caches_draw_identical_files() {
    let a = tempfile::TempDir::new().unwrap();
    let b = tempfile::TempDir::new().unwrap();
    IllustrationAssets::new(a.path()).ensure_materialized().unwrap();
    IllustrationAssets::new(b.path()).ensure_materialized().unwrap();
    assert_eq!(snapshot(a.path()), snapshot(b.path()));
}

#[test]
fn test_existing_files_are_never_overwritten() {
    let dir = tempfile::TempDir::new().unwrap();
    let assets = IllustrationAssets::new(dir.path());
    fs::write(assets.path_of("owl.png"), b"hand-made").unwrap();

    let report = assets.ensure_materialized().unwrap();
    assert_eq!(report.written.len(), 2);
    assert_eq!(report.existing, vec![assets.path_of("owl.png")]);
    assert_eq!(fs::read(assets.path_of("owl.png")).unwrap(), b"hand-made");
}

#[test]
fn test_concurrent_first_use() {
    let dir = tempfile::TempDir::new().unwrap();
    let assets = Arc::new(IllustrationAssets::new(dir.path().join("shared")));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let assets = Arc::clone(&assets);
            thread::spawn(move || assets.ensure_materialized().unwrap())
        })
        .collect();
    let written: usize = handles.into_iter().map(|h| h.join().unwrap().written.len()).sum();

    // Exactly one thread drew each file.
    assert_eq!(written, Character::assets().count());
    let files = snapshot(&dir.path().join("shared"));
    assert!(files.keys().all(|name| name.ends_with(".png")));
    for (character, _) in Character::assets() {
        assert!(assets.load(character).is_some());
    }
}
