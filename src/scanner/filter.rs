//! File eligibility predicate.
//!
//! The scanner never decides on its own which paths are worth hashing. It
//! asks a [`FileFilter`], and both the pre-scan count and the scan itself use
//! the same filter instance, so the two cannot disagree.

use std::fs::{self, FileType, Metadata};
use std::path::Path;

/// Default size ceiling in bytes. Files must be strictly smaller.
pub const DEFAULT_MAX_SIZE: u64 = 500_000_000;

/// Opaque predicate deciding whether a path takes part in a scan.
pub trait FileFilter: Send + Sync {
    /// Return `true` if `path` should be hashed and grouped.
    fn is_eligible(&self, path: &Path) -> bool;

    /// Decide for an entry whose type the walker already knows.
    ///
    /// `file_type` comes from the directory listing and describes the entry
    /// itself, never a link target. The default ignores it.
    fn is_eligible_entry(&self, path: &Path, file_type: FileType) -> bool {
        let _ = file_type;
        self.is_eligible(path)
    }
}

impl<F> FileFilter for F
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    fn is_eligible(&self, path: &Path) -> bool {
        self(path)
    }
}

/// The default eligibility rules.
///
/// A path is eligible when, in order:
/// 1. dotfile ignoring is off, or its base name does not start with `.`
/// 2. it is not a symbolic link
/// 3. it is a regular file
/// 4. its size is greater than zero and below `max_size`
///
/// Only file base names are checked against the dotfile rule; directories
/// are always descended into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityFilter {
    /// Skip files whose base name starts with `.`.
    pub ignore_dotfiles: bool,
    /// Exclusive upper bound on file size in bytes.
    pub max_size: u64,
}

impl Default for EligibilityFilter {
    fn default() -> Self {
        Self {
            ignore_dotfiles: false,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl EligibilityFilter {
    /// Create a filter with the default size ceiling.
    #[must_use]
    pub fn new(ignore_dotfiles: bool) -> Self {
        Self {
            ignore_dotfiles,
            ..Self::default()
        }
    }

    /// Override the size ceiling.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    fn is_dotfile(path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'))
    }

    fn skips_name(&self, path: &Path) -> bool {
        if self.ignore_dotfiles && Self::is_dotfile(path) {
            log::trace!("Skipping dotfile: {}", path.display());
            return true;
        }
        false
    }

    fn is_plain_file(path: &Path, file_type: FileType) -> bool {
        if file_type.is_symlink() {
            log::trace!("Skipping symlink: {}", path.display());
            return false;
        }
        file_type.is_file()
    }

    fn stat(path: &Path) -> Option<Metadata> {
        fs::symlink_metadata(path)
            .map_err(|e| log::debug!("Cannot stat {}: {}", path.display(), e))
            .ok()
    }

    fn size_in_range(&self, path: &Path, size: u64) -> bool {
        if size == 0 {
            log::debug!("Skipping empty file: {}", path.display());
            return false;
        }
        if size >= self.max_size {
            log::debug!(
                "Skipping file at or above size ceiling ({} bytes): {}",
                size,
                path.display()
            );
            return false;
        }
        true
    }
}

impl FileFilter for EligibilityFilter {
    fn is_eligible(&self, path: &Path) -> bool {
        if self.skips_name(path) {
            return false;
        }
        let Some(metadata) = Self::stat(path) else {
            return false;
        };
        Self::is_plain_file(path, metadata.file_type()) && self.size_in_range(path, metadata.len())
    }

    // Directories and links are rejected from the listing's type alone; only
    // regular files cost a stat, for their size.
    fn is_eligible_entry(&self, path: &Path, file_type: FileType) -> bool {
        if self.skips_name(path) || !Self::is_plain_file(path, file_type) {
            return false;
        }
        Self::stat(path).is_some_and(|m| self.size_in_range(path, m.len()))
    }
}
