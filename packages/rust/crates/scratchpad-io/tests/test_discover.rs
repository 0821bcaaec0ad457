//! Tests for discover module - YAML file discovery.

use std::fs;
use tempfile::TempDir;

use scratchpad_io::{DiscoverOptions, discover_yaml_files};

#[test]
fn test_discovers_nested_yaml_sorted() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("core")).unwrap();
    fs::create_dir_all(dir.path().join("personas")).unwrap();
    fs::write(dir.path().join("personas/saganpad.yml"), "---\n").unwrap();
    fs::write(dir.path().join("core/scratchpad-lite.yaml"), "---\n").unwrap();
    fs::write(dir.path().join("core/notes.md"), "# notes").unwrap();

    let files = discover_yaml_files(dir.path(), &DiscoverOptions::default()).files;
    let names: Vec<_> = files
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(names, vec!["core/scratchpad-lite.yaml", "personas/saganpad.yml"]);
}

#[test]
fn test_skips_hidden_and_configured_dirs() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".git")).unwrap();
    fs::create_dir_all(dir.path().join("node_modules")).unwrap();
    fs::write(dir.path().join(".git/config.yml"), "a: 1\n").unwrap();
    fs::write(dir.path().join("node_modules/pkg.yml"), "a: 1\n").unwrap();
    fs::write(dir.path().join("keep.yml"), "a: 1\n").unwrap();

    let files = discover_yaml_files(dir.path(), &DiscoverOptions::default()).files;
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("keep.yml"));
}

#[test]
fn test_missing_root_is_empty() {
    let dir = TempDir::new().unwrap();
    let discovery = discover_yaml_files(&dir.path().join("absent"), &DiscoverOptions::default());
    assert!(discovery.files.is_empty());
    assert!(discovery.errors.is_empty());
}

#[cfg(unix)]
#[test]
fn test_walk_errors_are_reported() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("core")).unwrap();
    fs::write(dir.path().join("core/a.yml"), "a: 1\n").unwrap();
    std::os::unix::fs::symlink(dir.path(), dir.path().join("core/loop")).unwrap();

    let options = DiscoverOptions {
        follow_links: true,
        ..DiscoverOptions::default()
    };
    let discovery = discover_yaml_files(dir.path(), &options);
    assert_eq!(discovery.files.len(), 1);
    assert_eq!(discovery.errors.len(), 1);
    assert!(discovery.errors[0].0.ends_with("core/loop"));
}
