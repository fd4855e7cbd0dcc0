//! Read-only view of a module's content directory.
//!
//! Every path handed to or returned from a [`FileTree`] is relative to the
//! module content root and uses `/` separators, whatever the host platform
//! uses. The empty string names the root itself.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::IoError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub name: String,
    pub is_dir: bool,
}

pub trait FileTree {
    /// Lists the immediate children of `dir`.
    fn read_dir(&self, dir: &str) -> Result<Vec<TreeEntry>, IoError>;

    fn file_size(&self, path: &str) -> Result<u64, IoError>;

    /// Reads at most `limit` bytes of the file at `path`.
    fn read_file(&self, path: &str, limit: u64) -> Result<Vec<u8>, IoError>;

    /// Every regular file in the tree, sorted.
    fn walk_files(&self) -> Result<Vec<String>, IoError> {
        let mut files = Vec::new();
        let mut pending = vec![String::new()];
        while let Some(dir) = pending.pop() {
            for entry in self.read_dir(&dir)? {
                let path = join(&dir, &entry.name);
                if entry.is_dir {
                    pending.push(path);
                } else {
                    files.push(path);
                }
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Joins a directory and a child name; the root is the empty string.
pub fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// The directory directly containing `path`, or `""` for root-level files.
pub fn dir_of(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// The final path element.
pub fn base_name(path: &str) -> &str {
    path.rsplit_once('/').map(|(_, name)| name).unwrap_or(path)
}

/// A module unpacked into a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirTree {
    root: PathBuf,
}

impl DirTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Like [`DirTree::new`], but checks that `root` is a readable directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, IoError> {
        let root = root.into();
        let metadata = fs::metadata(&root).map_err(|e| Self::io_error(root.clone(), e))?;
        if !metadata.is_dir() {
            return Err(IoError::not_found(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, rel: &str) -> PathBuf {
        rel.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }

    fn io_error(path: PathBuf, err: std::io::Error) -> IoError {
        if err.kind() == std::io::ErrorKind::NotFound {
            IoError::not_found(path)
        } else {
            IoError::read_error(path, err)
        }
    }
}

impl FileTree for DirTree {
    fn read_dir(&self, dir: &str) -> Result<Vec<TreeEntry>, IoError> {
        let full = self.resolve(dir);
        let entries = fs::read_dir(&full).map_err(|e| Self::io_error(full.clone(), e))?;

        let mut result = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Self::io_error(full.clone(), e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| Self::io_error(entry.path(), e))?;
            if !file_type.is_dir() && !file_type.is_file() {
                continue;
            }
            result.push(TreeEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: file_type.is_dir(),
            });
        }
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    fn file_size(&self, path: &str) -> Result<u64, IoError> {
        let full = self.resolve(path);
        let metadata = fs::metadata(&full).map_err(|e| Self::io_error(full.clone(), e))?;
        Ok(metadata.len())
    }

    fn read_file(&self, path: &str, limit: u64) -> Result<Vec<u8>, IoError> {
        let full = self.resolve(path);
        let file = fs::File::open(&full).map_err(|e| Self::io_error(full.clone(), e))?;
        let mut contents = Vec::new();
        file.take(limit)
            .read_to_end(&mut contents)
            .map_err(|e| IoError::read_error(full, e))?;
        Ok(contents)
    }

    fn walk_files(&self) -> Result<Vec<String>, IoError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| IoError::DirectoryScanError {
                path: self.root.clone(),
                source: e,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let segments: Vec<String> = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            files.push(segments.join("/"));
        }
        files.sort();
        Ok(files)
    }
}

/// An in-memory tree, for modules already extracted from an archive.
#[derive(Debug, Clone, Default)]
pub struct MemTree {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn get(&self, path: &str) -> Result<&Vec<u8>, IoError> {
        self.files.get(path).ok_or_else(|| IoError::not_found(path))
    }
}

impl FileTree for MemTree {
    fn read_dir(&self, dir: &str) -> Result<Vec<TreeEntry>, IoError> {
        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{dir}/")
        };

        let mut children: BTreeMap<&str, bool> = BTreeMap::new();
        for path in self.files.keys() {
            let Some(rest) = path.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((child, _)) => {
                    children.insert(child, true);
                }
                None => {
                    children.entry(rest).or_insert(false);
                }
            }
        }

        if children.is_empty() && !dir.is_empty() {
            return Err(IoError::not_found(dir));
        }

        Ok(children
            .into_iter()
            .map(|(name, is_dir)| TreeEntry {
                name: name.to_string(),
                is_dir,
            })
            .collect())
    }

    fn file_size(&self, path: &str) -> Result<u64, IoError> {
        Ok(self.get(path)?.len() as u64)
    }

    fn read_file(&self, path: &str, limit: u64) -> Result<Vec<u8>, IoError> {
        let contents = self.get(path)?;
        let end = contents.len().min(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(contents[..end].to_vec())
    }
}
