//! Command-line interface definitions.
//!
//! ```bash
//! # Review duplicates under ~/Downloads, deleting the rejected copies
//! dupes -d ~/Downloads
//!
//! # Only list duplicate groups
//! dupes -d ~/Downloads --find-only
//!
//! # Skip dotfiles, consider files up to 2 GB, move rejected copies to trash
//! dupes -d ~/Downloads --ignore-dotfiles --max-size 2GB --trash
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Find duplicate files in a directory tree and choose which copy to keep.
///
/// Files are compared by BLAKE3 content hash. For every group of identical
/// files you are asked which one to keep; the others are removed.
#[derive(Debug, Parser)]
#[command(name = "dupes")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan (may also come from the config file or DUPES_DIR)
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// List duplicate groups without prompting or deleting anything
    #[arg(long)]
    pub find_only: bool,

    /// Skip files whose name starts with '.'
    #[arg(long)]
    pub ignore_dotfiles: bool,

    /// Only consider files smaller than this (e.g. 500MB, 2GiB)
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub max_size: Option<u64>,

    /// Move removed copies to the system trash instead of deleting them
    #[arg(long)]
    pub trash: bool,

    /// Stop removing a group's copies at the first failure
    #[arg(long)]
    pub stop_on_error: bool,

    /// Read settings from this TOML file instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output and all logging except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Plain ASCII progress output without animation, for screen readers
    #[arg(long)]
    pub accessible: bool,

    /// Print fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Parse a human-readable size string into bytes.
///
/// Suffixes are case-insensitive; a bare number is bytes.
///
/// ```
/// use dupes::cli::parse_size;
///
/// assert_eq!(parse_size("500MB").unwrap(), 500_000_000);
/// assert_eq!(parse_size("1KiB").unwrap(), 1024);
/// assert_eq!(parse_size("42").unwrap(), 42);
/// ```
///
/// # Errors
///
/// Returns a message for an empty string, a malformed or negative number, or
/// an unknown suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("size cannot be empty".to_string());
    }
    if s.starts_with('-') {
        return Err("size cannot be negative".to_string());
    }

    let split = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    let (number, suffix) = s.split_at(split);

    let value: f64 = number
        .parse()
        .map_err(|_| format!("invalid number: '{number}'"))?;

    let multiplier: u64 = match suffix.trim().to_ascii_uppercase().as_str() {
        "" | "B" => 1,
        "K" | "KB" => 1_000,
        "KIB" => 1 << 10,
        "M" | "MB" => 1_000_000,
        "MIB" => 1 << 20,
        "G" | "GB" => 1_000_000_000,
        "GIB" => 1 << 30,
        "T" | "TB" => 1_000_000_000_000,
        "TIB" => 1 << 40,
        other => return Err(format!("unknown size suffix: '{other}'")),
    };

    Ok((value * multiplier as f64) as u64)
}
