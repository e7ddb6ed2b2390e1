//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and yielding the paths a [`FileFilter`] accepts. The walk is
//! sequential and children are visited in file-name order, so a static tree
//! is always walked in the same order. That order becomes the discovery
//! order of every duplicate group.
//!
//! # Features
//!
//! - Deterministic, sorted traversal
//! - Symbolic links are never followed
//! - Pluggable eligibility predicate
//! - Traversal errors surfaced as [`ScanError::Walk`] instead of stopping
//! - Graceful shutdown via atomic flag
//!
//! # Example
//!
//! ```no_run
//! use dupes::scanner::{EligibilityFilter, Walker};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), Arc::new(EligibilityFilter::default()));
//! let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
//! println!("Found {} eligible files", files.len());
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::WalkDir;

use super::{FileFilter, ScanError};

/// Directory walker for file discovery.
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Eligibility predicate applied to every entry
    filter: Arc<dyn FileFilter>,
    /// Optional shutdown flag for graceful termination
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl std::fmt::Debug for Walker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walker")
            .field("root", &self.root)
            .field("filter", &"<filter>")
            .field("shutdown_flag", &self.shutdown_flag)
            .finish()
    }
}

impl Walker {
    /// Create a new walker for the given root.
    #[must_use]
    pub fn new(root: &Path, filter: Arc<dyn FileFilter>) -> Self {
        Self {
            root: root.to_path_buf(),
            filter,
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// When the flag is set, the walk stops before yielding the next entry.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Walk the tree, yielding eligible file paths.
    ///
    /// Entries the filter rejects are skipped silently. Traversal failures
    /// are yielded as errors and the affected subtree is not descended into;
    /// iteration continues with the next sibling.
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, ScanError>> + '_ {
        let walk_dir = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        walk_dir
            .into_iter()
            .take_while(move |_| {
                if self.is_shutdown_requested() {
                    log::debug!("Walker: Shutdown requested, stopping iteration");
                    false
                } else {
                    true
                }
            })
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    if self.filter.is_eligible_entry(entry.path(), entry.file_type()) {
                        Some(Ok(entry.into_path()))
                    } else {
                        None
                    }
                }
                Err(e) => Some(Err(self.handle_walk_error(e))),
            })
    }

    /// Convert a walkdir error into a scan error.
    fn handle_walk_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        log::warn!("Walker error for {}: {}", path.display(), error);

        let source = match error.into_io_error() {
            Some(io) => io,
            None => std::io::Error::other("filesystem loop detected"),
        };
        ScanError::Walk { path, source }
    }
}
