//! Tests for change-set resolution.

use super::*;
use std::path::Path;

fn base() -> PathBuf {
    PathBuf::from("/work/repo")
}

fn names(entries: &[PathEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.archive_name(&base()).unwrap())
        .collect()
}

#[test]
fn test_parse_drops_empty_lines_and_carriage_returns() {
    let records = parse_change_records("src/a.txt\r\n\nsrc/b.txt\n");
    assert_eq!(records, vec!["src/a.txt", "src/b.txt"]);
}

#[test]
fn test_resolve_empty_input() {
    assert!(resolve("", &base()).is_empty());
    assert!(resolve("\n\n", &base()).is_empty());
}

#[test]
fn test_resolve_top_level_file_has_no_directory() {
    let entries = resolve("README.md\n", &base());
    assert_eq!(entries, vec![PathEntry::file(base().join("README.md"))]);
}

#[test]
fn test_resolve_emits_directories_before_files() {
    let entries = resolve("src/a.txt\nsrc/sub/b.txt\n", &base());
    assert_eq!(
        names(&entries),
        vec!["src/", "src/a.txt", "src/sub/", "src/sub/b.txt"]
    );
    assert!(entries[0].is_dir());
    assert!(!entries[1].is_dir());
}

#[test]
fn test_resolve_emits_whole_parent_chain_outermost_first() {
    let entries = resolve("a/b/c/file.rs\n", &base());
    assert_eq!(names(&entries), vec!["a/", "a/b/", "a/b/c/", "a/b/c/file.rs"]);
}

#[test]
fn test_resolve_dedups_non_contiguous_directories() {
    let entries = resolve("src/a.rs\ndocs/guide.md\nsrc/b.rs\n", &base());
    assert_eq!(
        names(&entries),
        vec!["src/", "src/a.rs", "docs/", "docs/guide.md", "src/b.rs"]
    );

    let src_dirs = entries
        .iter()
        .filter(|e| e.is_dir() && e.path == base().join("src"))
        .count();
    assert_eq!(src_dirs, 1);
}

#[test]
fn test_resolve_only_adds_missing_part_of_chain() {
    let entries = resolve("src/a.rs\nsrc/deep/er/b.rs\n", &base());
    assert_eq!(
        names(&entries),
        vec!["src/", "src/a.rs", "src/deep/", "src/deep/er/", "src/deep/er/b.rs"]
    );
}

#[test]
fn test_resolve_collapses_repeated_records() {
    let entries = resolve("src/a.rs\nsrc/a.rs\n", &base());
    assert_eq!(names(&entries), vec!["src/", "src/a.rs"]);
}

#[test]
fn test_every_file_is_preceded_by_its_directories() {
    let raw = "x/y/1\nz/2\nx/3\nx/y/w/4\nz/q/5\n";
    let entries = resolve(raw, &base());

    for (idx, entry) in entries.iter().enumerate() {
        if entry.is_dir() {
            continue;
        }
        for ancestor in entry.path.ancestors().skip(1) {
            if ancestor == base() {
                break;
            }
            let pos = entries
                .iter()
                .position(|e| e.is_dir() && e.path == ancestor)
                .unwrap_or_else(|| panic!("missing directory {}", ancestor.display()));
            assert!(pos < idx);
        }
    }

    let dirs: Vec<_> = entries.iter().filter(|e| e.is_dir()).collect();
    let unique: HashSet<_> = dirs.iter().map(|e| e.path.clone()).collect();
    assert_eq!(dirs.len(), unique.len());
    assert_eq!(dirs.len(), 5);
}

#[test]
fn test_archive_name_strips_base_and_separator() {
    let entry = PathEntry::file(Path::new("/work/repo/src/lib.rs").to_path_buf());
    assert_eq!(entry.archive_name(&base()).unwrap(), "src/lib.rs");

    let dir = PathEntry::directory(Path::new("/work/repo/src").to_path_buf());
    assert_eq!(dir.archive_name(&base()).unwrap(), "src/");
}

#[test]
fn test_archive_name_outside_base_is_error() {
    let entry = PathEntry::file(Path::new("/elsewhere/lib.rs").to_path_buf());
    let err = entry.archive_name(&base()).unwrap_err();
    assert!(matches!(err, ChangepackError::Archive(_)));
}

#[test]
fn test_filter_excluded_drops_matching_records() {
    let excludes = build_exclude_set(&["*.log".to_string(), "vendor/**".to_string()]).unwrap();
    let records = vec![
        "src/a.rs".to_string(),
        "debug.log".to_string(),
        "vendor/lib/x.js".to_string(),
    ];
    assert_eq!(filter_excluded(records, &excludes), vec!["src/a.rs"]);
}

#[test]
fn test_filter_excluded_with_no_patterns_keeps_everything() {
    let excludes = build_exclude_set(&[]).unwrap();
    let records = vec!["a".to_string(), "b/c".to_string()];
    assert_eq!(filter_excluded(records.clone(), &excludes), records);
}

#[test]
fn test_invalid_exclude_pattern_is_config_error() {
    let err = build_exclude_set(&["src/[".to_string()]).unwrap_err();
    assert!(matches!(err, ChangepackError::Config(_)));
}
