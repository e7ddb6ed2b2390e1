//! Duplicate groups and the digest-keyed registry that holds them.
//!
//! # Overview
//!
//! A [`DuplicateGroup`] collects every path whose content hashed to the same
//! digest, in the order the scan discovered them. The [`DuplicateRegistry`]
//! maps digests to groups and only ever creates a group or appends to one:
//! groups are never merged, reordered or removed.
//!
//! # Example
//!
//! ```
//! use dupes::duplicates::DuplicateRegistry;
//! use std::path::PathBuf;
//!
//! let mut registry = DuplicateRegistry::new();
//! registry.insert([1u8; 32], PathBuf::from("/a.txt"));
//! registry.insert([1u8; 32], PathBuf::from("/b.txt"));
//! registry.insert([2u8; 32], PathBuf::from("/c.txt"));
//!
//! assert_eq!(registry.len(), 2);
//! let dupes: Vec<_> = registry.duplicates().collect();
//! assert_eq!(dupes.len(), 1);
//! assert_eq!(dupes[0].paths(), &[PathBuf::from("/a.txt"), PathBuf::from("/b.txt")]);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::scanner::{hash_to_hex, Hash};

/// All known files sharing one content digest.
///
/// `paths` is never empty and keeps discovery order. Positions in `paths`
/// are the indices shown to the user and accepted by keep decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    digest: Hash,
    paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Create a group from the first path observed for `digest`.
    #[must_use]
    pub fn new(digest: Hash, first: PathBuf) -> Self {
        Self {
            digest,
            paths: vec![first],
        }
    }

    /// Append a newly discovered path with the same content.
    pub fn add_path(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    /// Content digest shared by every member.
    #[must_use]
    pub fn digest(&self) -> &Hash {
        &self.digest
    }

    /// Digest as hexadecimal string.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        hash_to_hex(&self.digest)
    }

    /// Member paths in discovery order.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// The first-discovered path; the group's representative.
    #[must_use]
    pub fn first(&self) -> &Path {
        &self.paths[0]
    }

    /// Number of files in this group. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Whether the group holds more than one path.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        self.paths.len() > 1
    }

    /// Number of redundant copies (total - 1).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    /// `"[i] path"` lines for every member, in index order.
    #[must_use]
    pub fn index_lines(&self) -> Vec<String> {
        self.paths
            .iter()
            .enumerate()
            .map(|(i, p)| format!("[{}] {}", i, p.display()))
            .collect()
    }
}

/// Digest-keyed collection of duplicate groups.
///
/// Iteration follows group creation order, which for a deterministic walk is
/// deterministic too.
#[derive(Debug, Clone, Default)]
pub struct DuplicateRegistry {
    index: HashMap<Hash, usize>,
    groups: Vec<DuplicateGroup>,
}

impl DuplicateRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path` under `digest`, creating the group on first sighting.
    ///
    /// Returns `true` if a new group was created.
    pub fn insert(&mut self, digest: Hash, path: PathBuf) -> bool {
        match self.index.get(&digest) {
            Some(&slot) => {
                log::trace!(
                    "Duplicate of {}: {}",
                    self.groups[slot].first().display(),
                    path.display()
                );
                self.groups[slot].add_path(path);
                false
            }
            None => {
                self.index.insert(digest, self.groups.len());
                self.groups.push(DuplicateGroup::new(digest, path));
                true
            }
        }
    }

    /// Look up the group for a digest.
    #[must_use]
    pub fn get(&self, digest: &Hash) -> Option<&DuplicateGroup> {
        self.index.get(digest).map(|&slot| &self.groups[slot])
    }

    /// Number of distinct digests seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no file has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of paths across all groups.
    #[must_use]
    pub fn total_paths(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::len).sum()
    }

    /// All groups in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &DuplicateGroup> {
        self.groups.iter()
    }

    /// Groups with more than one member, in creation order.
    pub fn duplicates(&self) -> impl Iterator<Item = &DuplicateGroup> {
        self.groups.iter().filter(|g| g.is_duplicate())
    }

    /// Number of groups with more than one member.
    #[must_use]
    pub fn duplicate_group_count(&self) -> usize {
        self.duplicates().count()
    }
}

impl<'a> IntoIterator for &'a DuplicateRegistry {
    type Item = &'a DuplicateGroup;
    type IntoIter = std::slice::Iter<'a, DuplicateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
