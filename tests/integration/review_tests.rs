use dupes::duplicates::scan_tree;
use dupes::report::ErrorLog;
use dupes::review::{review_groups, ReviewOptions, ReviewSummary, PROMPT};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn fixture() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"alpha").unwrap();
    fs::write(dir.path().join("b.txt"), b"alpha").unwrap();
    fs::write(dir.path().join("c.txt"), b"alpha").unwrap();
    fs::create_dir(dir.path().join("photos")).unwrap();
    fs::write(dir.path().join("photos/x.jpg"), b"beta").unwrap();
    fs::write(dir.path().join("photos/y.jpg"), b"beta").unwrap();
    fs::write(dir.path().join("lonely.txt"), b"gamma").unwrap();
    dir
}

fn review(root: &Path, answers: &str, options: &ReviewOptions) -> (ReviewSummary, String, ErrorLog) {
    yansi::disable();
    let outcome = scan_tree(root, false).unwrap();
    let mut input = Cursor::new(answers.to_string());
    let mut output = Vec::new();
    let mut errors = ErrorLog::new();
    let summary = review_groups(&outcome.registry, &mut input, &mut output, options, &mut errors)
        .unwrap();
    (summary, String::from_utf8(output).unwrap(), errors)
}

#[test]
fn test_keep_index_one_of_three() {
    let dir = fixture();

    let (summary, text, errors) = review(dir.path(), "1\nn\n", &ReviewOptions::default());

    assert!(!dir.path().join("a.txt").exists());
    assert!(dir.path().join("b.txt").exists());
    assert!(!dir.path().join("c.txt").exists());
    assert!(dir.path().join("photos/x.jpg").exists());
    assert!(dir.path().join("photos/y.jpg").exists());
    assert!(errors.is_empty());
    assert_eq!(summary.files_removed, 2);
    assert_eq!(summary.bytes_freed, 10);
    assert!(text.contains(&format!("Dupes found for {}", dir.path().join("a.txt").display())));
    assert!(text.contains(&format!("\t [2] {}", dir.path().join("c.txt").display())));
}

#[test]
fn test_groups_are_prompted_in_discovery_order() {
    let dir = fixture();

    let (_, text, _) = review(
        dir.path(),
        "n\nn\n",
        &ReviewOptions {
            find_only: true,
            ..Default::default()
        },
    );

    let alpha = text.find("a.txt").unwrap();
    let beta = text.find("x.jpg").unwrap();
    assert!(alpha < beta);
    assert!(!text.contains("lonely.txt"));
}

#[test]
fn test_affirmative_answers_keep_first() {
    let dir = fixture();

    let (summary, _, _) = review(dir.path(), "YES\ny\n", &ReviewOptions::default());

    assert_eq!(summary.resolved, 2);
    assert!(dir.path().join("a.txt").exists());
    assert!(dir.path().join("photos/x.jpg").exists());
    assert!(!dir.path().join("photos/y.jpg").exists());
}

#[test]
fn test_garbage_answer_declines() {
    let dir = fixture();

    let (summary, text, errors) = review(dir.path(), "maybe\nkeep\n", &ReviewOptions::default());

    assert_eq!(summary.declined, 2);
    assert_eq!(text.matches("No action taken. Continuing.").count(), 2);
    assert!(errors.is_empty());
    assert!(dir.path().join("c.txt").exists());
}

#[test]
fn test_index_equal_to_group_size_is_reported_without_deleting() {
    let dir = fixture();

    let (summary, text, errors) = review(dir.path(), "3\n-1\n", &ReviewOptions::default());

    assert_eq!(errors.len(), 2);
    assert_eq!(summary.resolved, 0);
    assert!(text.contains("invalid index [3]: choose between 0 and 2"));
    assert!(text.contains("invalid index [-1]: choose between 0 and 1"));
    for name in ["a.txt", "b.txt", "c.txt", "photos/x.jpg", "photos/y.jpg"] {
        assert!(dir.path().join(name).exists(), "{name} was deleted");
    }
}

#[test]
fn test_every_prompt_is_printed_once_per_group() {
    let dir = fixture();

    let (_, text, _) = review(dir.path(), "n\nn\n", &ReviewOptions::default());

    assert_eq!(text.matches(PROMPT).count(), 2);
}
