//! Resolution engine: turns a duplicate group plus a decision into deletions.
//!
//! # Overview
//!
//! A [`Decision`] is parsed from one line of operator input. [`resolve`]
//! validates it against the group and, for a valid keep decision, deletes
//! every other member in path order. The registry itself is never touched;
//! resolution only affects the filesystem.
//!
//! # Failure policy
//!
//! Governed by [`DeleteConfig::continue_on_error`]:
//! - `true` (default): every deletion is attempted and every failure is
//!   reported in [`Resolution::Kept::failures`].
//! - `false`: deletion stops at the first failure, which is reported; later
//!   paths stay on disk.
//!
//! # Example
//!
//! ```no_run
//! use dupes::actions::{resolve, Decision, DeleteConfig};
//! use dupes::duplicates::scan_tree;
//! use std::path::Path;
//!
//! let outcome = scan_tree(Path::new("."), false).unwrap();
//! for group in outcome.registry.duplicates() {
//!     let decision = Decision::parse("1");
//!     match resolve(group, decision, &DeleteConfig::default()) {
//!         Ok(resolution) => println!("{:?}", resolution),
//!         Err(e) => eprintln!("{}", e),
//!     }
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

use super::delete::{delete_batch, DeleteConfig, DeleteError, DeleteResult};
use crate::duplicates::DuplicateGroup;

/// What the operator chose for one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Keep the path at this position and delete the rest.
    ///
    /// Signed so that a negative answer is rejected instead of wrapping.
    Keep(i64),
    /// Take no action.
    Decline,
}

impl Decision {
    /// Parse one line of input.
    ///
    /// - empty, `y` or `yes` (any case) keep index 0
    /// - an integer keeps that index (validated later by [`resolve`])
    /// - anything else declines
    ///
    /// # Examples
    ///
    /// ```
    /// use dupes::actions::Decision;
    ///
    /// assert_eq!(Decision::parse(""), Decision::Keep(0));
    /// assert_eq!(Decision::parse("Yes"), Decision::Keep(0));
    /// assert_eq!(Decision::parse(" 2\n"), Decision::Keep(2));
    /// assert_eq!(Decision::parse("n"), Decision::Decline);
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let answer = input.trim();
        if answer.is_empty() || is_affirmative(answer) {
            return Self::Keep(0);
        }
        match answer.parse::<i64>() {
            Ok(index) => Self::Keep(index),
            Err(_) => Self::Decline,
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Outcome of resolving one group.
#[derive(Debug)]
pub enum Resolution {
    /// The path at `index` was kept and the others were removed.
    Kept {
        /// Position of the kept path in the group
        index: usize,
        /// The kept path
        kept: PathBuf,
        /// Successful deletions, in path order
        removed: Vec<DeleteResult>,
        /// Failed deletions, in path order
        failures: Vec<DeleteError>,
    },
    /// Nothing was done.
    Declined,
}

impl Resolution {
    /// Bytes freed by this resolution.
    #[must_use]
    pub fn bytes_freed(&self) -> u64 {
        match self {
            Self::Kept { removed, .. } => removed.iter().map(|r| r.size).sum(),
            Self::Declined => 0,
        }
    }
}

/// A decision that could not be applied. No file was touched.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The keep index is outside `0..len`.
    #[error("invalid index [{index}]: choose between 0 and {max} for {first}", max = .len.saturating_sub(1))]
    IndexOutOfRange {
        /// Requested index
        index: i64,
        /// Number of paths in the group
        len: usize,
        /// Representative path of the group
        first: PathBuf,
    },

    /// The copy to keep is gone, so deleting the others would lose the content.
    #[error("refusing to delete duplicates: kept file {0} no longer exists")]
    KeptFileMissing(PathBuf),
}

/// Apply `decision` to `group`.
///
/// # Errors
///
/// Returns [`ResolveError`] if the keep index is out of range or the kept
/// file has disappeared; in both cases nothing is deleted. Per-path
/// deletion failures are not errors here: they are reported in
/// [`Resolution::Kept::failures`].
pub fn resolve(
    group: &DuplicateGroup,
    decision: Decision,
    config: &DeleteConfig,
) -> Result<Resolution, ResolveError> {
    let requested = match decision {
        Decision::Decline => {
            log::debug!("No action for group {}", group.first().display());
            return Ok(Resolution::Declined);
        }
        Decision::Keep(index) => index,
    };

    let index = usize::try_from(requested)
        .ok()
        .filter(|&i| i < group.len())
        .ok_or_else(|| ResolveError::IndexOutOfRange {
            index: requested,
            len: group.len(),
            first: group.first().to_path_buf(),
        })?;

    let kept = group.paths()[index].clone();
    if std::fs::symlink_metadata(&kept).is_err() {
        log::error!("Kept file vanished: {}", kept.display());
        return Err(ResolveError::KeptFileMissing(kept));
    }

    let doomed: Vec<PathBuf> = group
        .paths()
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != index)
        .map(|(_, p)| p.clone())
        .collect();

    log::info!(
        "Keeping [{}] {}, removing {} duplicate(s)",
        index,
        kept.display(),
        doomed.len()
    );
    let batch = delete_batch(&doomed, config);
    log::info!("{}", batch.summary());

    Ok(Resolution::Kept {
        index,
        kept,
        removed: batch.successes,
        failures: batch.failures,
    })
}
