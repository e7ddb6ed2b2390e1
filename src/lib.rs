//! dupes - interactive duplicate file finder
//!
//! Walks a directory tree, groups regular files by BLAKE3 content hash and,
//! for every group of identical files, asks which copy to keep. The rest are
//! deleted permanently or moved to the system trash.
//!
//! The library is usable on its own:
//!
//! ```no_run
//! use dupes::actions::{resolve, Decision, DeleteConfig};
//! use dupes::duplicates::scan_tree;
//! use std::path::Path;
//!
//! let outcome = scan_tree(Path::new("/data"), true).unwrap();
//! for group in outcome.registry.duplicates() {
//!     resolve(group, Decision::Keep(0), &DeleteConfig::trash()).unwrap();
//! }
//! ```

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod progress;
pub mod report;
pub mod review;
pub mod scanner;
pub mod signal;

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::Result;

use crate::cli::Cli;
use crate::config::Config;
use crate::duplicates::{DuplicateFinder, FinderConfig};
use crate::error::ExitCode;
use crate::progress::{progress_hidden, Progress, ProgressCallback};
use crate::report::ErrorLog;
use crate::review::{review_groups, ReviewError, ReviewOptions};

/// Run the binary: settings, logging, Ctrl+C, then scan and review on the
/// process's stdin and stdout.
///
/// # Errors
///
/// Fatal problems only: unusable configuration, a missing or invalid root,
/// terminal I/O failure, or an interrupt while scanning
/// ([`duplicates::FinderError::Interrupted`]) or reviewing
/// ([`ReviewError::Interrupted`]).
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    }

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_cli(&cli);
    log::debug!("Effective configuration: {:?}", config);

    let handler = signal::install_handler()?;
    let stdin = io::stdin();
    let stdout = io::stdout();

    let hidden = progress_hidden(cli.quiet, config.find_only, stdout.is_terminal());
    let progress: Arc<dyn ProgressCallback> =
        Arc::new(Progress::with_accessible(hidden, cli.accessible));
    run_with_io(
        &config,
        Some(progress),
        handler.get_flag(),
        &mut stdin.lock(),
        &mut stdout.lock(),
    )
}

/// Scan the configured root, review every duplicate group over
/// `input`/`output`, then print the error summary and the tally.
///
/// # Errors
///
/// See [`run_app`].
pub fn run_with_io<R: BufRead, W: Write>(
    config: &Config,
    progress: Option<Arc<dyn ProgressCallback>>,
    shutdown_flag: Arc<AtomicBool>,
    input: &mut R,
    output: &mut W,
) -> Result<ExitCode> {
    let root = config.root()?;

    let mut finder_config = FinderConfig::default()
        .with_filter(config.filter())
        .with_shutdown_flag(Arc::clone(&shutdown_flag));
    if let Some(progress) = progress {
        finder_config = finder_config.with_progress_callback(progress);
    }
    let outcome = DuplicateFinder::new(finder_config).scan_tree(root)?;
    let duplicate_groups = outcome.registry.duplicate_group_count();

    let mut errors = ErrorLog::new();
    errors.extend_scan_errors(outcome.errors);

    if duplicate_groups == 0 {
        writeln!(output, "No duplicates found under {}", root.display())?;
    }

    let options = ReviewOptions {
        find_only: config.find_only,
        delete: config.delete_config(),
        shutdown_flag: Some(shutdown_flag),
    };
    let summary = review_groups(&outcome.registry, input, output, &options, &mut errors)?;

    errors.write_summary(output)?;
    writeln!(output, "\n{}", summary.line())?;
    output.flush()?;

    if summary.interrupted {
        return Err(ReviewError::Interrupted.into());
    }
    Ok(ExitCode::for_run(duplicate_groups, errors.len()))
}
