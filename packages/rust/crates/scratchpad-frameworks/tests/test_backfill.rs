//! Template backfill over a temp frameworks tree.

use std::fs;

use scratchpad_frameworks::{CodexConfig, Record, backfill_tree, keys, load};
use tempfile::TempDir;

#[test]
fn test_every_record_gets_a_version() {
    let dir = TempDir::new().unwrap();
    let config = CodexConfig::from_base(dir.path().to_path_buf());
    let core = config.frameworks_dir.join("core");
    let built = config.frameworks_dir.join("purpose-built");
    fs::create_dir_all(&core).unwrap();
    fs::create_dir_all(&built).unwrap();

    fs::write(core.join("scratchpad-2.5-medium.yml"), "name: Medium\nframework: {}\n").unwrap();
    fs::write(
        core.join("pinned.yml"),
        "name: Pinned\nversion: '3.1'\ndocumentation:\n  purpose: Kept\n  use_case: Kept too\n",
    )
    .unwrap();
    fs::write(built.join("odd-tool.yaml"), "name: Odd\nversion: ''\n").unwrap();
    fs::write(built.join("empty.yml"), "").unwrap();

    let pinned_before = fs::read(core.join("pinned.yml")).unwrap();
    let report = backfill_tree(&config).unwrap();
    assert_eq!(report.processed, 4);
    assert!(!report.has_errors());
    assert_eq!(report.changed, 3);

    for path in [
        core.join("scratchpad-2.5-medium.yml"),
        core.join("pinned.yml"),
        built.join("odd-tool.yaml"),
        built.join("empty.yml"),
    ] {
        let value = load(&path).unwrap().unwrap();
        let record = Record::new(&value).unwrap();
        let version = record.version().unwrap();
        assert!(!version.trim().is_empty(), "{}", path.display());
    }

    assert_eq!(fs::read(core.join("pinned.yml")).unwrap(), pinned_before);
    let pinned = load(&core.join("pinned.yml")).unwrap().unwrap();
    assert_eq!(pinned[keys::VERSION].as_str(), Some("3.1"));
    assert_eq!(pinned[keys::DOCUMENTATION][keys::PURPOSE].as_str(), Some("Kept"));

    let odd = load(&built.join("odd-tool.yaml")).unwrap().unwrap();
    assert_eq!(odd[keys::VERSION].as_str(), Some("1.0"));
    assert_eq!(
        odd[keys::DOCUMENTATION][keys::USE_CASE].as_str(),
        Some("Purpose Built tasks requiring structured cognitive approach")
    );
}

#[test]
fn test_version_lands_after_name() {
    let dir = TempDir::new().unwrap();
    let config = CodexConfig::from_base(dir.path().to_path_buf());
    let core = config.frameworks_dir.join("core");
    fs::create_dir_all(&core).unwrap();
    let path = core.join("scratchpad-2.5-medium.yml");
    fs::write(&path, "name: Medium\ncategory: core\n").unwrap();

    backfill_tree(&config).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("---\nname: Medium\nversion: \"2.5\"\ncategory: core\n"), "{text}");

    let second = backfill_tree(&config).unwrap();
    assert_eq!(second.changed, 0);
}
