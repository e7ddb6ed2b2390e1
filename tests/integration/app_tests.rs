use dupes::config::Config;
use dupes::duplicates::FinderError;
use dupes::error::ExitCode;
use dupes::review::ReviewError;
use dupes::run_with_io;
use std::fs;
use std::io::{self, BufRead, Cursor, Read};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tempfile::tempdir;

fn config_for(root: &Path) -> Config {
    Config {
        dir: Some(root.to_path_buf()),
        ..Config::default()
    }
}

fn run(config: &Config, answers: &str) -> (anyhow::Result<ExitCode>, String) {
    yansi::disable();
    let mut output = Vec::new();
    let result = run_with_io(
        config,
        None,
        Arc::new(AtomicBool::new(false)),
        &mut Cursor::new(answers.to_string()),
        &mut output,
    );
    (result, String::from_utf8(output).unwrap())
}

#[test]
fn test_no_duplicates_exit_code() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"one").unwrap();
    fs::write(dir.path().join("b"), b"two").unwrap();

    let (result, text) = run(&config_for(dir.path()), "");

    assert_eq!(result.unwrap(), ExitCode::NoDuplicates);
    assert!(text.contains("No duplicates found"));
    assert!(text.contains("0 duplicate group(s), 0 file(s) removed"));
}

#[test]
fn test_clean_run_exit_code_and_tally() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"12345678").unwrap();
    fs::write(dir.path().join("b"), b"12345678").unwrap();

    let (result, text) = run(&config_for(dir.path()), "\n");

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(dir.path().join("a").exists());
    assert!(!dir.path().join("b").exists());
    assert!(text.contains("1 duplicate group(s), 1 file(s) removed"));
    assert!(!text.contains("The following errors occurred"));
}

#[test]
fn test_find_only_deletes_nothing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"same").unwrap();
    fs::write(dir.path().join("b"), b"same").unwrap();
    let config = Config {
        find_only: true,
        ..config_for(dir.path())
    };

    let (result, text) = run(&config, "1\n");

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(dir.path().join("a").exists());
    assert!(dir.path().join("b").exists());
    assert!(text.contains("Dupes found for"));
    assert!(!text.contains("Remove dupes?"));
}

#[test]
fn test_reported_errors_give_partial_success() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"same").unwrap();
    fs::write(dir.path().join("b"), b"same").unwrap();

    let (result, text) = run(&config_for(dir.path()), "5\n");

    assert_eq!(result.unwrap(), ExitCode::PartialSuccess);
    assert!(text.contains("The following errors occurred during the run:"));
    assert!(dir.path().join("a").exists());
    assert!(dir.path().join("b").exists());
}

#[test]
fn test_ignore_dotfiles_from_config() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".a"), b"same").unwrap();
    fs::write(dir.path().join("b"), b"same").unwrap();
    let config = Config {
        ignore_dotfiles: true,
        ..config_for(dir.path())
    };

    let (result, _) = run(&config, "");

    assert_eq!(result.unwrap(), ExitCode::NoDuplicates);
}

#[test]
fn test_missing_root_is_fatal() {
    let dir = tempdir().unwrap();

    let (result, text) = run(&config_for(&dir.path().join("missing")), "");

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FinderError>(),
        Some(FinderError::RootNotFound(_))
    ));
    assert!(text.is_empty());
}

#[test]
fn test_missing_dir_setting_is_fatal() {
    let (result, _) = run(&Config::default(), "");
    assert!(result.is_err());
}

#[test]
fn test_interrupt_before_scan() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"same").unwrap();
    fs::write(dir.path().join("b"), b"same").unwrap();

    let result = run_with_io(
        &config_for(dir.path()),
        None,
        Arc::new(AtomicBool::new(true)),
        &mut Cursor::new(String::new()),
        &mut Vec::new(),
    );

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FinderError>(),
        Some(FinderError::Interrupted)
    ));
    assert!(dir.path().join("b").exists());
}

/// Answers from `inner`, raising `flag` as the first answer is read, the way
/// Ctrl+C lands while the user sits at the prompt.
struct InterruptingInput {
    inner: Cursor<Vec<u8>>,
    flag: Arc<AtomicBool>,
}

impl Read for InterruptingInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.flag.store(true, Ordering::SeqCst);
        self.inner.read(buf)
    }
}

impl BufRead for InterruptingInput {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.flag.store(true, Ordering::SeqCst);
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt);
    }
}

#[test]
fn test_interrupt_during_review() {
    yansi::disable();
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a1"), b"first").unwrap();
    fs::write(dir.path().join("a2"), b"first").unwrap();
    fs::write(dir.path().join("b1"), b"second").unwrap();
    fs::write(dir.path().join("b2"), b"second").unwrap();

    let flag = Arc::new(AtomicBool::new(false));
    let mut input = InterruptingInput {
        inner: Cursor::new(b"\n\n".to_vec()),
        flag: Arc::clone(&flag),
    };
    let mut output = Vec::new();

    let result = run_with_io(
        &config_for(dir.path()),
        None,
        flag,
        &mut input,
        &mut output,
    );

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ReviewError>(),
        Some(ReviewError::Interrupted)
    ));
    assert_eq!(err.to_string(), "review interrupted");
    assert_eq!(ExitCode::for_error(&err), ExitCode::Interrupted);

    // The answered group was resolved, the next one never prompted.
    assert!(!dir.path().join("a2").exists());
    assert!(dir.path().join("b1").exists());
    assert!(dir.path().join("b2").exists());
    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.matches("Remove dupes?").count(), 1);
    assert!(text.contains("1 duplicate group(s), 1 file(s) removed"));
}

#[test]
fn test_non_utf8_answer_does_not_abort_run() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"same").unwrap();
    fs::write(dir.path().join("b"), b"same").unwrap();
    yansi::disable();
    let mut output = Vec::new();

    let result = run_with_io(
        &config_for(dir.path()),
        None,
        Arc::new(AtomicBool::new(false)),
        &mut Cursor::new(b"\xff\n".to_vec()),
        &mut output,
    );

    assert_eq!(result.unwrap(), ExitCode::Success);
    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("No action taken. Continuing."));
    assert!(text.contains("1 duplicate group(s), 0 file(s) removed"));
    assert!(dir.path().join("a").exists());
    assert!(dir.path().join("b").exists());
}
