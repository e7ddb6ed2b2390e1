//! Run-wide error aggregation.
//!
//! Every non-fatal problem of a run (scan errors, rejected decisions, failed
//! deletions) lands in one [`ErrorLog`], in the order it happened, and is
//! printed once after all groups have been processed.

use std::io::{self, Write};

use thiserror::Error;

use crate::actions::{DeleteError, Resolution, ResolveError};
use crate::scanner::ScanError;

/// One non-fatal error of a run.
#[derive(Debug, Error)]
pub enum RunError {
    /// A file could not be hashed or a directory could not be read.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// A decision could not be applied to a group.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A duplicate could not be deleted.
    #[error(transparent)]
    Delete(#[from] DeleteError),
}

/// Ordered collection of [`RunError`]s.
#[derive(Debug, Default)]
pub struct ErrorLog {
    errors: Vec<RunError>,
}

impl ErrorLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one error.
    pub fn push(&mut self, error: impl Into<RunError>) {
        self.errors.push(error.into());
    }

    /// Append scan errors, preserving their order.
    pub fn extend_scan_errors(&mut self, errors: impl IntoIterator<Item = ScanError>) {
        self.errors.extend(errors.into_iter().map(RunError::Scan));
    }

    /// Forward every failure a resolution produced.
    ///
    /// Returns the resolution with its failures drained.
    pub fn record_resolution(&mut self, mut resolution: Resolution) -> Resolution {
        if let Resolution::Kept {
            ref mut failures, ..
        } = resolution
        {
            self.errors
                .extend(failures.drain(..).map(RunError::Delete));
        }
        resolution
    }

    /// Number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether nothing went wrong.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Recorded errors in order.
    pub fn iter(&self) -> impl Iterator<Item = &RunError> {
        self.errors.iter()
    }

    /// Print the end-of-run summary: a header and one error per line.
    ///
    /// Writes nothing when the log is empty.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.errors.is_empty() {
            return Ok(());
        }

        writeln!(out, "\nThe following errors occurred during the run:")?;
        for error in &self.errors {
            writeln!(out, "{}", error)?;
        }
        Ok(())
    }
}
