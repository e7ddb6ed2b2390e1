use dupes::actions::DeleteConfig;
use dupes::duplicates::{scan_tree, DuplicateFinder, FinderConfig};
use dupes::report::{ErrorLog, RunError};
use dupes::review::{review_groups, ReviewOptions};
use std::fs;
use std::io::Cursor;
use tempfile::tempdir;

#[test]
fn test_vanished_duplicates_are_reported_and_others_still_removed() {
    let dir = tempdir().unwrap();
    for name in ["a", "b", "c", "d"] {
        fs::write(dir.path().join(name), b"payload").unwrap();
    }
    let outcome = scan_tree(dir.path(), false).unwrap();
    fs::remove_file(dir.path().join("b")).unwrap();
    fs::remove_file(dir.path().join("c")).unwrap();

    yansi::disable();
    let mut errors = ErrorLog::new();
    let mut output = Vec::new();
    let summary = review_groups(
        &outcome.registry,
        &mut Cursor::new("0\n"),
        &mut output,
        &ReviewOptions::default(),
        &mut errors,
    )
    .unwrap();

    assert_eq!(summary.files_removed, 1);
    assert!(!dir.path().join("d").exists());
    assert!(dir.path().join("a").exists());
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| matches!(e, RunError::Delete(_))));

    let mut report = Vec::new();
    errors.write_summary(&mut report).unwrap();
    let report = String::from_utf8(report).unwrap();
    assert!(report.starts_with("\nThe following errors occurred during the run:\n"));
    let b = report.find(&dir.path().join("b").display().to_string()).unwrap();
    let c = report.find(&dir.path().join("c").display().to_string()).unwrap();
    assert!(b < c);
}

#[test]
fn test_stop_on_error_leaves_the_rest_of_the_group() {
    let dir = tempdir().unwrap();
    for name in ["a", "b", "c"] {
        fs::write(dir.path().join(name), b"payload").unwrap();
    }
    let outcome = scan_tree(dir.path(), false).unwrap();
    fs::remove_file(dir.path().join("b")).unwrap();

    let options = ReviewOptions {
        delete: DeleteConfig::default().with_continue_on_error(false),
        ..Default::default()
    };
    let mut errors = ErrorLog::new();
    review_groups(
        &outcome.registry,
        &mut Cursor::new("0\n"),
        &mut Vec::new(),
        &options,
        &mut errors,
    )
    .unwrap();

    assert_eq!(errors.len(), 1);
    assert!(dir.path().join("a").exists());
    assert!(dir.path().join("c").exists());
}

#[test]
fn test_vanished_kept_file_protects_the_group() {
    let dir = tempdir().unwrap();
    for name in ["a", "b"] {
        fs::write(dir.path().join(name), b"payload").unwrap();
    }
    let outcome = scan_tree(dir.path(), false).unwrap();
    fs::remove_file(dir.path().join("a")).unwrap();

    let mut errors = ErrorLog::new();
    review_groups(
        &outcome.registry,
        &mut Cursor::new("\n"),
        &mut Vec::new(),
        &ReviewOptions::default(),
        &mut errors,
    )
    .unwrap();

    assert!(dir.path().join("b").exists());
    assert!(matches!(errors.iter().next(), Some(RunError::Resolve(_))));
}

#[cfg(unix)]
#[test]
fn test_scan_errors_come_first_in_the_log() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"payload").unwrap();
    fs::write(dir.path().join("b"), b"payload").unwrap();
    fs::create_dir(dir.path().join("c_dir")).unwrap();

    // Letting a directory through makes its hash fail.
    let config = FinderConfig::default().with_filter(|_: &std::path::Path| true);
    let outcome = DuplicateFinder::new(config).scan_tree(dir.path()).unwrap();
    assert_eq!(outcome.errors.len(), 1);

    let mut errors = ErrorLog::new();
    errors.extend_scan_errors(outcome.errors);
    review_groups(
        &outcome.registry,
        &mut Cursor::new("7\n"),
        &mut Vec::new(),
        &ReviewOptions::default(),
        &mut errors,
    )
    .unwrap();

    let kinds: Vec<_> = errors
        .iter()
        .map(|e| match e {
            RunError::Scan(_) => "scan",
            RunError::Resolve(_) => "resolve",
            RunError::Delete(_) => "delete",
        })
        .collect();
    assert_eq!(kinds, vec!["scan", "resolve"]);
}
