//! Tree scanner: walks a directory and groups eligible files by content.
//!
//! # Overview
//!
//! [`DuplicateFinder::scan_tree`] walks the root with a [`Walker`], hashes
//! every path the eligibility filter accepts and records it in a
//! [`DuplicateRegistry`]. Hash and traversal failures are collected as
//! [`ScanError`]s and never stop the scan. [`DuplicateFinder::count_eligible`]
//! performs the same walk with the same filter but without hashing, to size
//! the progress bar.
//!
//! # Example
//!
//! ```no_run
//! use dupes::duplicates::scan_tree;
//! use std::path::Path;
//!
//! let outcome = scan_tree(Path::new("."), true).unwrap();
//! for group in outcome.registry.duplicates() {
//!     println!("{} copies of {}", group.len(), group.first().display());
//! }
//! for err in &outcome.errors {
//!     eprintln!("{}", err);
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use super::DuplicateRegistry;
use crate::progress::ProgressCallback;
use crate::scanner::{EligibilityFilter, FileFilter, Hasher, ScanError, Walker};

/// Fatal scan errors.
#[derive(Debug, Error)]
pub enum FinderError {
    /// The root directory does not exist.
    #[error("no such directory: {0}")]
    RootNotFound(PathBuf),

    /// The root exists but is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The root could not be inspected.
    #[error("cannot access {path}: {source}")]
    RootInaccessible {
        /// Root path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The scan was interrupted by a shutdown request.
    #[error("scan interrupted")]
    Interrupted,
}

/// Result of a completed scan.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Every hashed file, grouped by digest
    pub registry: DuplicateRegistry,
    /// Non-fatal errors in the order they were encountered
    pub errors: Vec<ScanError>,
}

/// Configuration for the tree scanner.
#[derive(Clone)]
pub struct FinderConfig {
    /// Eligibility predicate shared by counting and scanning.
    pub filter: Arc<dyn FileFilter>,
    /// Content hasher.
    pub hasher: Hasher,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("filter", &"<filter>")
            .field("hasher", &self.hasher)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            filter: Arc::new(EligibilityFilter::default()),
            hasher: Hasher::new(),
            shutdown_flag: None,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Use the default eligibility rules with the given dotfile setting.
    #[must_use]
    pub fn with_ignore_dotfiles(self, ignore_dotfiles: bool) -> Self {
        self.with_filter(EligibilityFilter::new(ignore_dotfiles))
    }

    /// Replace the eligibility predicate.
    #[must_use]
    pub fn with_filter(mut self, filter: impl FileFilter + 'static) -> Self {
        self.filter = Arc::new(filter);
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Scans directory trees for files with identical content.
#[derive(Debug, Clone, Default)]
pub struct DuplicateFinder {
    config: FinderConfig,
}

impl DuplicateFinder {
    /// Create a finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Create a finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    fn walker(&self, root: &Path) -> Walker {
        let walker = Walker::new(root, Arc::clone(&self.config.filter));
        match self.config.shutdown_flag {
            Some(ref flag) => walker.with_shutdown_flag(Arc::clone(flag)),
            None => walker,
        }
    }

    /// Count the files a scan of `root` would hash.
    ///
    /// Traversal errors are not counted.
    ///
    /// # Errors
    ///
    /// Fails if `root` is missing or not a directory, or if a shutdown is
    /// requested while counting.
    pub fn count_eligible(&self, root: &Path) -> Result<usize, FinderError> {
        check_root(root)?;
        let count = self.walker(root).walk().filter(Result::is_ok).count();

        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }
        log::debug!("{} eligible files under {}", count, root.display());
        Ok(count)
    }

    /// Scan `root`, grouping every eligible file by content digest.
    ///
    /// Each file is hashed and inserted before the next one is looked at; a
    /// shutdown request is only observed between files.
    ///
    /// # Errors
    ///
    /// Fails if `root` is missing or not a directory, or if a shutdown is
    /// requested. Per-file problems are reported in [`ScanOutcome::errors`].
    pub fn scan_tree(&self, root: &Path) -> Result<ScanOutcome, FinderError> {
        check_root(root)?;

        let callback = self.config.progress_callback.as_ref();
        if let Some(cb) = callback {
            cb.on_phase_start("counting", 0);
            let total = self.count_eligible(root);
            cb.on_phase_end("counting");
            cb.on_phase_start("hashing", total?);
        }

        log::info!("Scanning {}", root.display());
        let mut outcome = ScanOutcome::default();
        let mut processed = 0usize;

        for entry in self.walker(root).walk() {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    outcome.errors.push(e);
                    continue;
                }
            };

            match self.config.hasher.full_hash(&path) {
                Ok(digest) => {
                    outcome.registry.insert(digest, path.clone());
                }
                Err(e) => {
                    log::warn!("Failed to hash {}: {}", path.display(), e);
                    outcome.errors.push(ScanError::Hash(e));
                }
            }

            processed += 1;
            if let Some(cb) = callback {
                cb.on_progress(processed, path.to_string_lossy().as_ref());
            }
        }

        if let Some(cb) = callback {
            cb.on_phase_end("hashing");
        }

        if self.config.is_shutdown_requested() {
            log::info!("Scan interrupted after {} files", processed);
            return Err(FinderError::Interrupted);
        }

        log::info!(
            "Scan complete: {} files, {} distinct contents, {} duplicate groups, {} errors",
            processed,
            outcome.registry.len(),
            outcome.registry.duplicate_group_count(),
            outcome.errors.len()
        );

        Ok(outcome)
    }
}

/// Scan `root` with the default eligibility rules.
///
/// # Errors
///
/// See [`DuplicateFinder::scan_tree`].
pub fn scan_tree(root: &Path, ignore_dotfiles: bool) -> Result<ScanOutcome, FinderError> {
    DuplicateFinder::new(FinderConfig::default().with_ignore_dotfiles(ignore_dotfiles))
        .scan_tree(root)
}

/// Count eligible files under `root` with the default eligibility rules.
///
/// # Errors
///
/// See [`DuplicateFinder::count_eligible`].
pub fn count_eligible(root: &Path, ignore_dotfiles: bool) -> Result<usize, FinderError> {
    DuplicateFinder::new(FinderConfig::default().with_ignore_dotfiles(ignore_dotfiles))
        .count_eligible(root)
}

/// Verify the scan root exists and is a directory.
///
/// # Errors
///
/// Returns the matching [`FinderError`] when it is not.
pub fn check_root(root: &Path) -> Result<(), FinderError> {
    match std::fs::metadata(root) {
        Ok(m) if m.is_dir() => Ok(()),
        Ok(_) => Err(FinderError::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(FinderError::RootNotFound(root.to_path_buf()))
        }
        Err(e) => Err(FinderError::RootInaccessible {
            path: root.to_path_buf(),
            source: e,
        }),
    }
}
