//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Content-addressed grouping of files ([`groups`])
//! - Scanning a tree into a registry of groups ([`finder`])

pub mod finder;
pub mod groups;

pub use finder::{
    check_root, count_eligible, scan_tree, DuplicateFinder, FinderConfig, FinderError,
    ScanOutcome,
};
pub use groups::{DuplicateGroup, DuplicateRegistry};
