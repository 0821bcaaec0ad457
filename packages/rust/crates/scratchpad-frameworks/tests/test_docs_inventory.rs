//! Docs generation and file inventory on a temp tree.

use std::fs;

use chrono::{TimeZone, Utc};
use scratchpad_frameworks::{
    COMPARISON_FILE, CodexConfig, FrameworkError, InventoryEntry, REFERENCE_FILE, scan_inventory,
    write_docs,
};
use sha2::{Digest, Sha256};
use tempfile::TempDir;

const DUMMY: &str = "\
name: Dummy Framework
version: '1.0'
category: core
documentation:
  purpose: Testing purpose
  use_case: Testing use case
  character_count: 123
framework:
  content: test content
";

#[test]
fn test_write_docs_in_temp_tree() {
    let dir = TempDir::new().unwrap();
    let config = CodexConfig::from_base(dir.path().to_path_buf());
    let core = config.frameworks_dir.join("core");
    fs::create_dir_all(&core).unwrap();
    fs::write(core.join("dummy.yml"), DUMMY).unwrap();
    fs::write(core.join("broken.yml"), "name: [\n").unwrap();

    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let report = write_docs(&config, at).unwrap();
    assert_eq!(report.frameworks, 1);

    let comparison = fs::read_to_string(config.docs_dir.join(COMPARISON_FILE)).unwrap();
    assert!(comparison.contains("| Dummy Framework | Core | `1.0` | 123 |"), "{comparison}");

    let reference = fs::read_to_string(config.docs_dir.join(REFERENCE_FILE)).unwrap();
    assert!(reference.starts_with("# Framework Quick Reference\n"));
    assert!(reference.contains("**Last Updated**: 2024-05-01T12:00:00Z"));
    assert!(reference.contains("- [Core](#core)"));
    assert!(reference.contains("### Dummy Framework"));
    assert!(reference.contains("**File**: `dummy.yml` | **Version**: 1.0 | **Size**: ~123 chars"));
    assert!(reference.contains("**Purpose**: Testing purpose"));
    assert!(reference.contains("**Use Cases**: Testing use case"));
}

#[test]
fn test_write_docs_requires_frameworks_dir() {
    let dir = TempDir::new().unwrap();
    let config = CodexConfig::from_base(dir.path().to_path_buf());
    let result = write_docs(&config, Utc::now());
    assert!(matches!(result, Err(FrameworkError::MissingRoot(_))));
    assert!(!config.docs_dir.exists());
}

#[test]
fn test_inventory_hashes_and_skips() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("nested")).unwrap();
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
    fs::write(root.join("a.yml"), "name: A\n").unwrap();
    fs::write(root.join("nested/b.txt"), "hello").unwrap();
    fs::write(root.join(".git/HEAD"), "ref").unwrap();
    fs::write(root.join("node_modules/pkg/index.js"), "x").unwrap();

    let report = scan_inventory(root).unwrap();
    let paths: Vec<&str> = report
        .files
        .iter()
        .map(|entry| match entry {
            InventoryEntry::File { path, .. } | InventoryEntry::Error { path, .. } => path.as_str(),
        })
        .collect();
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0], "a.yml");
    assert!(paths[1].ends_with("b.txt"));
    assert_eq!(report.errors().count(), 0);

    let expected = hex::encode(Sha256::digest(b"hello"));
    match &report.files[1] {
        InventoryEntry::File { size, sha256, .. } => {
            assert_eq!(*size, 5);
            assert_eq!(sha256, &expected);
        }
        other => panic!("unexpected {other:?}"),
    }

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["files"][0]["path"], "a.yml");
    assert!(json["root"].as_str().unwrap().len() > 1);
}
