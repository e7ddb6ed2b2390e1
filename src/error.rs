//! Process exit codes and machine-readable error output.

use serde::Serialize;

use crate::duplicates::FinderError;
use crate::review::ReviewError;

/// Exit codes for the dupes binary.
///
/// - 0: run completed cleanly with at least one duplicate group
/// - 1: fatal error (bad root, bad config, terminal failure)
/// - 2: run completed, no duplicates found
/// - 3: run completed, but non-fatal errors were reported
/// - 130: interrupted by Ctrl+C
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Completed, duplicates found.
    Success = 0,
    /// Fatal error.
    GeneralError = 1,
    /// Completed, no duplicates.
    NoDuplicates = 2,
    /// Completed with non-fatal errors.
    PartialSuccess = 3,
    /// Interrupted by the user.
    Interrupted = 130,
}

impl ExitCode {
    /// Numeric process exit status.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Machine-readable prefix used in error lines.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DP000",
            Self::GeneralError => "DP001",
            Self::NoDuplicates => "DP002",
            Self::PartialSuccess => "DP003",
            Self::Interrupted => "DP130",
        }
    }

    /// Pick the completion code for a run that was not interrupted.
    ///
    /// Reported errors take precedence over "no duplicates".
    #[must_use]
    pub fn for_run(duplicate_groups: usize, error_count: usize) -> Self {
        if error_count > 0 {
            Self::PartialSuccess
        } else if duplicate_groups == 0 {
            Self::NoDuplicates
        } else {
            Self::Success
        }
    }

    /// Map a fatal application error to its exit code.
    ///
    /// Interrupts in either phase give 130; everything else is fatal.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        let scan_interrupted = err
            .downcast_ref::<FinderError>()
            .is_some_and(|e| matches!(e, FinderError::Interrupted));
        let review_interrupted = err
            .downcast_ref::<ReviewError>()
            .is_some_and(|e| matches!(e, ReviewError::Interrupted));

        if scan_interrupted || review_interrupted {
            Self::Interrupted
        } else {
            Self::GeneralError
        }
    }
}

/// JSON shape printed for fatal errors with `--json-errors`.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// Code prefix, e.g. "DP001"
    pub code: String,
    /// Process exit status
    pub exit_code: i32,
    /// Error chain rendered as one line
    pub message: String,
    /// Whether the run was interrupted
    pub interrupted: bool,
}

impl StructuredError {
    /// Build from an application error and the exit code it maps to.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{:#}", err),
            interrupted: exit_code == ExitCode::Interrupted,
        }
    }
}
