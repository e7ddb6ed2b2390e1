//! Scanner module for directory traversal, eligibility filtering and file hashing.
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`filter`]: The eligibility predicate deciding which paths are considered
//! - [`walker`]: Sequential, sorted directory traversal
//! - [`hasher`]: BLAKE3 file hashing (streaming)
//!
//! # Example
//!
//! ```no_run
//! use dupes::scanner::{EligibilityFilter, Walker};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let filter = Arc::new(EligibilityFilter::new(true));
//! let walker = Walker::new(Path::new("."), filter);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(path) => println!("{}", path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod filter;
pub mod hasher;
pub mod walker;

use std::path::{Path, PathBuf};

// Re-export main types
pub use filter::{EligibilityFilter, FileFilter, DEFAULT_MAX_SIZE};
pub use hasher::{hash_to_hex, Hash, Hasher};
pub use walker::Walker;

/// Errors that can occur while scanning a tree.
///
/// Scan errors are never fatal: they are collected in discovery order and
/// the affected path is left out of every duplicate group.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// An eligible file could not be hashed.
    #[error(transparent)]
    Hash(#[from] HashError),

    /// The traversal could not read an entry; its subtree was skipped.
    #[error("cannot read {path}: {source}")]
    Walk {
        /// Path where the traversal failed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Path the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Hash(e) => e.path(),
            Self::Walk { path, .. } => path,
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Classify an I/O error raised while opening or reading `path`.
    pub(crate) fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Path of the file that failed to hash.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Io { path: p, .. } => p,
        }
    }
}
