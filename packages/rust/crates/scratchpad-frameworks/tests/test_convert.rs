//! Conversion and normalization passes over a temp frameworks tree.

use std::fs;
use std::path::Path;

use scratchpad_frameworks::{
    BatchReport, CodexConfig, FrameworkError, Rewrite, RewriteConfig, SkipReason, convert_tree, load,
    mark_tree, normalize_tree, rewrite_file,
};
use tempfile::TempDir;

fn tree() -> (TempDir, CodexConfig) {
    let dir = TempDir::new().unwrap();
    let config = CodexConfig::from_base(dir.path().to_path_buf());
    fs::create_dir_all(config.frameworks_dir.join("core")).unwrap();
    (dir, config)
}

fn write(root: &Path, rel: &str, text: &str) {
    fs::write(root.join(rel), text).unwrap();
}

#[test]
fn test_convert_tree_mixed_inputs() {
    let (_dir, config) = tree();
    let fw = &config.frameworks_dir;
    write(
        fw,
        "core/tagged.yml",
        "name: Tagged\nframework:\n  content: \"<role>Be helpful</role><rules><rule>Be kind.</rule></rules>\"\n",
    );
    write(
        fw,
        "core/legacy.yml",
        "name: Legacy\nframework:\n  legacy_content: \"<rules>no sentinel</rules>\"\n",
    );
    write(fw, "core/plain.yml", "name: Plain\nframework:\n  content: just prose\n");
    write(fw, "core/broken.yml", "name: [unclosed\n");

    let legacy_before = fs::read(fw.join("core/legacy.yml")).unwrap();
    let report = convert_tree(&config, &RewriteConfig::default()).unwrap();

    assert_eq!(report.processed, 4);
    assert_eq!(report.changed, 1);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].0.ends_with("broken.yml"));

    // Unknown legacy format: bytes untouched.
    assert_eq!(fs::read(fw.join("core/legacy.yml")).unwrap(), legacy_before);

    let converted = load(&fw.join("core/tagged.yml")).unwrap().unwrap();
    assert_eq!(
        converted["framework"]["structure"]["role"].as_str(),
        Some("Be helpful")
    );
    assert_eq!(
        converted["framework"]["structure"]["rules"]["rule"].as_str(),
        Some("Be kind.")
    );
    assert!(converted["framework"]["content"].is_null());
    assert!(
        converted["framework"]["original_content"]
            .as_str()
            .unwrap()
            .starts_with("<role>")
    );
}

#[test]
fn test_convert_is_idempotent() {
    let (_dir, config) = tree();
    let path = config.frameworks_dir.join("core/a.yml");
    fs::write(
        &path,
        "name: A\nframework:\n  content: \"<a>1</a>\\n<b>[X: y]</b>\"\n",
    )
    .unwrap();

    let first = convert_tree(&config, &RewriteConfig::default()).unwrap();
    assert_eq!(first.changed, 1);
    let after_first = fs::read(&path).unwrap();

    let second = convert_tree(&config, &RewriteConfig::default()).unwrap();
    assert_eq!(second.changed, 0);
    assert_eq!(fs::read(&path).unwrap(), after_first);
    assert!(matches!(
        rewrite_file(&path, &RewriteConfig::default()).unwrap(),
        Rewrite::Unchanged(SkipReason::AlreadyStructured)
    ));
}

#[test]
fn test_missing_root_fails_before_work() {
    let dir = TempDir::new().unwrap();
    let config = CodexConfig::from_base(dir.path().join("absent"));
    assert!(matches!(
        convert_tree(&config, &RewriteConfig::default()),
        Err(FrameworkError::MissingRoot(_))
    ));
    assert!(matches!(normalize_tree(&config), Err(FrameworkError::MissingRoot(_))));
}

#[test]
fn test_normalize_writes_only_when_needed() {
    let (_dir, config) = tree();
    let path = config.frameworks_dir.join("core/n.yml");
    fs::write(&path, "name: Norm\nversion: 1.0\nflag: 'yes'\n").unwrap();

    let first = normalize_tree(&config).unwrap();
    assert_eq!(first.changed, 1);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "---\nname: Norm\nversion: \"1.0\"\nflag: \"yes\"\n"
    );

    let second = normalize_tree(&config).unwrap();
    assert_eq!(second.changed, 0);
    assert!(!second.has_errors());
}

#[test]
fn test_markers_pass() {
    let (_dir, config) = tree();
    write(&config.frameworks_dir, "core/m.yml", "name: M\n");
    write(&config.frameworks_dir, "core/ok.yaml", "---\nname: OK\n");

    let report = mark_tree(&config).unwrap();
    assert_eq!(report.processed, 2);
    assert_eq!(report.changed, 1);
    assert_eq!(
        fs::read_to_string(config.frameworks_dir.join("core/m.yml")).unwrap(),
        "---\nname: M\n"
    );
}

#[test]
fn test_invalid_utf8_is_reported_and_left_untouched() {
    const LATIN1: &[u8] = b"name: caf\xe9\nframework:\n  content: \"<role>x</role>\"\n";
    type Pass = fn(&CodexConfig) -> scratchpad_frameworks::Result<BatchReport>;
    fn convert_default(config: &CodexConfig) -> scratchpad_frameworks::Result<BatchReport> {
        convert_tree(config, &RewriteConfig::default())
    }
    let passes: [(&str, Pass); 3] = [
        ("markers", mark_tree),
        ("normalize", normalize_tree),
        ("convert", convert_default),
    ];

    for (name, pass) in passes {
        let (_dir, config) = tree();
        let path = config.frameworks_dir.join("core/latin1.yml");
        fs::write(&path, LATIN1).unwrap();

        let report = pass(&config).unwrap();
        assert_eq!(report.changed, 0, "{name}");
        assert_eq!(report.errors.len(), 1, "{name}");
        assert!(report.errors[0].1.contains("UTF-8"), "{name}: {}", report.errors[0].1);
        assert_eq!(fs::read(&path).unwrap(), LATIN1, "{name}");
    }
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_reported() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, config) = tree();
    let locked = config.frameworks_dir.join("locked");
    fs::create_dir_all(&locked).unwrap();
    write(&config.frameworks_dir, "locked/hidden.yml", "name: H\n");
    write(&config.frameworks_dir, "core/ok.yml", "name: OK\n");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users read through mode 000; nothing to observe then.
    let readable = fs::read_dir(&locked).is_ok();
    let report = mark_tree(&config).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    if readable {
        return;
    }

    assert_eq!(report.processed, 1);
    assert_eq!(report.changed, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].0.ends_with("locked"));
}
