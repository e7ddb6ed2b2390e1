//! Interactive review of duplicate groups.
//!
//! For every group with more than one member the reviewer prints the
//! group's representative path and an enumerated `[index] path` list. Unless
//! running in find-only mode it then reads one line, parses it as a
//! [`Decision`] and hands the group to the resolution engine.
//!
//! Input and output are generic so the loop can be driven by a terminal or
//! by a test.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use yansi::Paint;

use crate::actions::{resolve, Decision, DeleteConfig, Resolution};
use crate::duplicates::DuplicateRegistry;
use crate::report::ErrorLog;

/// Prompt shown before reading a decision.
pub const PROMPT: &str = "Remove dupes? [Y/n or index of file to keep]: ";

/// Fatal outcome of a review pass, beyond terminal I/O failure.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Ctrl+C arrived between two groups.
    #[error("review interrupted")]
    Interrupted,
}

/// Options for a review pass.
#[derive(Debug, Clone, Default)]
pub struct ReviewOptions {
    /// List groups without prompting or deleting anything.
    pub find_only: bool,
    /// How duplicates are removed.
    pub delete: DeleteConfig,
    /// Optional shutdown flag; checked before each prompt.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
}

/// Tally of a review pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewSummary {
    /// Duplicate groups listed.
    pub groups: usize,
    /// Groups where a keep decision was applied.
    pub resolved: usize,
    /// Groups left untouched by choice, invalid input or end of input.
    pub declined: usize,
    /// Files removed.
    pub files_removed: usize,
    /// Bytes freed.
    pub bytes_freed: u64,
    /// Whether the pass stopped early because of a shutdown request.
    pub interrupted: bool,
}

impl ReviewSummary {
    /// One-line human-readable tally.
    #[must_use]
    pub fn line(&self) -> String {
        format!(
            "{} duplicate group(s), {} file(s) removed, {} freed",
            self.groups,
            self.files_removed,
            bytesize::ByteSize::b(self.bytes_freed)
        )
    }
}

/// Walk every duplicate group in `registry`, prompting on `input`/`output`.
///
/// Non-fatal problems are appended to `errors`. Once input is exhausted all
/// remaining groups are listed and declined.
///
/// # Errors
///
/// Only terminal I/O failures are returned.
pub fn review_groups<R: BufRead, W: Write>(
    registry: &DuplicateRegistry,
    input: &mut R,
    output: &mut W,
    options: &ReviewOptions,
    errors: &mut ErrorLog,
) -> io::Result<ReviewSummary> {
    let mut summary = ReviewSummary::default();
    let mut input_exhausted = false;

    for group in registry.duplicates() {
        if options
            .shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
        {
            log::info!("Review interrupted");
            summary.interrupted = true;
            break;
        }

        summary.groups += 1;
        log::debug!("Reviewing group {}", group.digest_hex());
        writeln!(
            output,
            "\n{} {}",
            "Dupes found for".bold(),
            group.first().display()
        )?;
        for line in group.index_lines() {
            writeln!(output, "\t {}", line)?;
        }

        if options.find_only {
            continue;
        }

        let decision = if input_exhausted {
            Decision::Decline
        } else {
            write!(output, "{}", PROMPT)?;
            output.flush()?;

            // Raw bytes: an answer that is not UTF-8 is just an invalid answer.
            let mut answer = Vec::new();
            if input.read_until(b'\n', &mut answer)? == 0 {
                log::warn!("End of input, declining remaining groups");
                input_exhausted = true;
                writeln!(output)?;
                Decision::Decline
            } else {
                Decision::parse(&String::from_utf8_lossy(&answer))
            }
        };

        match resolve(group, decision, &options.delete) {
            Ok(Resolution::Declined) => {
                summary.declined += 1;
                writeln!(output, "No action taken. Continuing.")?;
            }
            Ok(resolution) => {
                let resolution = errors.record_resolution(resolution);
                summary.resolved += 1;
                summary.bytes_freed += resolution.bytes_freed();
                if let Resolution::Kept { ref removed, .. } = resolution {
                    summary.files_removed += removed.len();
                }
            }
            Err(e) => {
                summary.declined += 1;
                writeln!(output, "{}", e.to_string().red())?;
                errors.push(e);
            }
        }
    }

    Ok(summary)
}
