//! File actions module.
//!
//! This module provides functionality for:
//! - Permanent deletion, or moving files to the system trash
//! - Parsing operator decisions and resolving duplicate groups
//!
//! # Resolution
//!
//! ```no_run
//! use dupes::actions::{resolve, Decision, DeleteConfig};
//! use dupes::duplicates::DuplicateGroup;
//! use std::path::PathBuf;
//!
//! let mut group = DuplicateGroup::new([0u8; 32], PathBuf::from("/a.txt"));
//! group.add_path(PathBuf::from("/b.txt"));
//!
//! // Keep /b.txt, delete /a.txt
//! let result = resolve(&group, Decision::Keep(1), &DeleteConfig::default());
//! ```

pub mod delete;
pub mod resolve;

// Re-export commonly used types
pub use delete::{
    delete_batch, delete_file, delete_to_trash, permanent_delete, BatchDeleteResult,
    DeleteConfig, DeleteError, DeleteResult,
};
pub use resolve::{resolve, Decision, Resolution, ResolveError};
