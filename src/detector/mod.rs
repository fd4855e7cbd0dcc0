//! License detection for one module version.
//!
//! A [`Detector`] classifies the module's root license files as soon as it
//! is built; that alone decides whether the module is redistributable.
//! License files in subdirectories are only examined on the first package
//! or all-licenses query, and are indexed by the directory that holds them.
//!
//! ```text
//! new() ──> module licenses ready ──(first package_info / all_licenses)──> indexed
//! ```

mod exception;
pub mod license;

pub use crate::classifier::Coverage;
pub use license::{License, LicenseMetadata};

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::discovery::{collect_license_files, Which};
use crate::error::IoError;
use crate::tree::{dir_of, FileTree};

/// Redistributability of one package and the licenses that apply to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageInfo<'d> {
    pub redistributable: bool,
    /// Licenses found on the package's directory path, then the module's
    /// root licenses.
    pub licenses: Vec<&'d License>,
}

impl PackageInfo<'_> {
    fn rejected() -> Self {
        Self {
            redistributable: false,
            licenses: Vec::new(),
        }
    }
}

enum Index {
    Unindexed,
    Indexed(LicenseIndex),
}

struct LicenseIndex {
    /// Root licenses first, then every non-root license.
    all: Vec<License>,
    root_count: usize,
    /// Directory to positions in `all`. Never holds the root directory.
    by_directory: BTreeMap<String, Vec<usize>>,
}

impl LicenseIndex {
    fn new(root: Vec<License>, nested: Vec<License>) -> Self {
        let root_count = root.len();
        let mut all = root;
        let mut by_directory: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for license in nested {
            let dir = dir_of(license.file_path()).to_string();
            by_directory.entry(dir).or_default().push(all.len());
            all.push(license);
        }
        Self {
            all,
            root_count,
            by_directory,
        }
    }
}

pub struct Detector<'a> {
    module_path: String,
    version: String,
    tree: &'a dyn FileTree,
    config: &'a Config,
    module_licenses: Vec<License>,
    module_redistributable: bool,
    index: Index,
}

impl<'a> Detector<'a> {
    /// Builds a detector over `tree`, the module's content directory, and
    /// classifies its root license files.
    pub fn new(
        module_path: impl Into<String>,
        version: impl Into<String>,
        tree: &'a dyn FileTree,
        config: &'a Config,
    ) -> Self {
        let mut detector = Self {
            module_path: module_path.into(),
            version: version.into(),
            tree,
            config,
            module_licenses: Vec::new(),
            module_redistributable: false,
            index: Index::Unindexed,
        };

        if let Some(licenses) = exception::override_licenses(tree, &detector.module_path, config) {
            debug!(
                module = %detector.module_path,
                version = %detector.version,
                files = licenses.len(),
                "module matches its license exception"
            );
            let (root, nested): (Vec<License>, Vec<License>) = licenses
                .into_iter()
                .partition(|l| dir_of(l.file_path()).is_empty());
            detector.module_licenses = root.clone();
            detector.module_redistributable = true;
            detector.index = Index::Indexed(LicenseIndex::new(root, nested));
            return detector;
        }

        detector.module_licenses = detector.detect(Which::Root);
        detector.module_redistributable = config.policy().is_redistributable(
            detector
                .module_licenses
                .iter()
                .flat_map(|l| l.types().iter()),
        );
        debug!(
            module = %detector.module_path,
            version = %detector.version,
            licenses = detector.module_licenses.len(),
            redistributable = detector.module_redistributable,
            "module licenses detected"
        );
        detector
    }

    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn module_is_redistributable(&self) -> bool {
        self.module_redistributable
    }

    /// The licenses found directly in the module content root.
    pub fn module_licenses(&self) -> &[License] {
        &self.module_licenses
    }

    /// Every license in the module, root licenses first.
    pub fn all_licenses(&mut self) -> &[License] {
        &self.indexed().all
    }

    /// Redistributability of the package in `dir`, relative to the module
    /// root, and the licenses that apply to it.
    ///
    /// A package is redistributable only if the module is and no license on
    /// its directory path below the root disqualifies it.
    pub fn package_info(&mut self, dir: &str) -> PackageInfo<'_> {
        let Some(dir) = clean_dir(dir) else {
            debug!(module = %self.module_path, dir, "rejecting package path outside module");
            return PackageInfo::rejected();
        };

        let module_redistributable = self.module_redistributable;
        let config = self.config;
        let index = self.indexed();

        let mut licenses: Vec<&License> = index
            .by_directory
            .iter()
            .filter(|(key, _)| is_within(key, &dir))
            .flat_map(move |(_, positions)| positions.iter().map(move |&i| &index.all[i]))
            .collect();

        let redistributable = module_redistributable
            && (licenses.is_empty()
                || config
                    .policy()
                    .is_redistributable(licenses.iter().flat_map(|l| l.types().iter())));

        licenses.extend(index.all[..index.root_count].iter());
        PackageInfo {
            redistributable,
            licenses,
        }
    }

    fn indexed(&mut self) -> &LicenseIndex {
        if let Index::Unindexed = self.index {
            let nested = self.detect(Which::NonRoot);
            debug!(
                module = %self.module_path,
                version = %self.version,
                licenses = nested.len(),
                "indexed package licenses"
            );
            self.index = Index::Indexed(LicenseIndex::new(self.module_licenses.clone(), nested));
        }
        match &self.index {
            Index::Indexed(index) => index,
            Index::Unindexed => unreachable!("license index is built above"),
        }
    }

    fn detect(&self, which: Which) -> Vec<License> {
        let paths = match collect_license_files(
            self.tree,
            &self.module_path,
            which,
            self.config.ignore_list(),
        ) {
            Ok(paths) => paths,
            Err(err) => {
                warn!(module = %self.module_path, error = %err, "failed to list license files");
                Vec::new()
            }
        };
        paths.iter().map(|path| self.detect_file(path)).collect()
    }

    fn detect_file(&self, path: &str) -> License {
        let contents = match read_license_file(self.tree, path, self.config.max_file_size()) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(module = %self.module_path, path, error = %err, "failed to read license file");
                return License {
                    metadata: LicenseMetadata::unknown(path),
                    contents: None,
                };
            }
        };

        let classification = self.config.classifier().classify(&contents, path);
        let showable = self
            .config
            .policy()
            .is_redistributable(classification.types.iter());
        trace!(path, types = ?classification.types, showable, "classified license file");

        License {
            metadata: LicenseMetadata {
                types: classification.types,
                file_path: path.to_string(),
                coverage: classification.coverage,
            },
            contents: showable.then_some(contents),
        }
    }
}

/// Reads a license file, refusing files larger than `max` bytes.
fn read_license_file(tree: &dyn FileTree, path: &str, max: u64) -> Result<Vec<u8>, IoError> {
    let size = tree.file_size(path)?;
    if size > max {
        return Err(IoError::file_too_large(path, size, max));
    }
    tree.read_file(path, max)
}

/// Normalizes a package directory relative to the module root. Returns
/// `None` for absolute paths and paths that climb out of the root.
fn clean_dir(dir: &str) -> Option<String> {
    if dir.starts_with('/') || dir.starts_with('\\') {
        return None;
    }
    let mut segments: Vec<&str> = Vec::new();
    for segment in dir.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            _ => segments.push(segment),
        }
    }
    Some(segments.join("/"))
}

/// Reports whether `dir` is `ancestor` or lies beneath it.
fn is_within(ancestor: &str, dir: &str) -> bool {
    format!("{dir}/").starts_with(&format!("{ancestor}/"))
}
