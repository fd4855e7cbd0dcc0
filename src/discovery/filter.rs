use std::collections::{BTreeMap, BTreeSet};

use crate::tree::dir_of;

/// Which part of the module a collection pass looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Which {
    /// Files directly in the module content root.
    Root,
    /// Files in any subdirectory.
    NonRoot,
    All,
}

impl Which {
    pub fn accepts(self, path: &str) -> bool {
        let at_root = dir_of(path).is_empty();
        match self {
            Which::Root => at_root,
            Which::NonRoot => !at_root,
            Which::All => true,
        }
    }
}

/// Reports whether `path` belongs to vendored third-party code.
///
/// A `vendor` directory only excludes what lies beneath one of its
/// subdirectories: `vendor/LICENSE` is the license of a package named
/// vendor, while `vendor/pkg/LICENSE` is someone else's.
pub fn is_vendored(path: &str) -> bool {
    let dir = dir_of(path);
    if dir.is_empty() {
        return false;
    }
    let segments: Vec<&str> = dir.split('/').collect();
    segments[..segments.len() - 1]
        .iter()
        .any(|segment| *segment == "vendor")
}

/// Known false-positive license files, keyed by module path.
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl IgnoreList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, module_path: impl Into<String>, file_path: impl Into<String>) {
        self.entries
            .entry(module_path.into())
            .or_default()
            .insert(file_path.into());
    }

    pub fn is_ignored(&self, module_path: &str, file_path: &str) -> bool {
        self.entries
            .get(module_path)
            .is_some_and(|files| files.contains(file_path))
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
