//! Hand-reviewed exceptions to ordinary license classification.
//!
//! Two mechanisms live here. Corpus additions are license texts the catalog
//! does not recognize but which have been reviewed; they are matched like
//! any catalog text. Module exceptions pin the exact license files of one
//! module and only apply while the module still contains exactly those
//! files.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::classifier::LicenseType;
use crate::error::ConfigError;
use crate::policy::Policy;

const BUNDLED_EXCEPTIONS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/license-rules/exceptions.json"
));

/// Lower-cases `text` and collapses every whitespace run to one space.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CorpusAddition {
    pub id: String,
    pub types: Vec<LicenseType>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExceptionFile {
    /// Path relative to the module root.
    pub path: String,
    pub types: Vec<LicenseType>,
    /// Expected contents, normalized.
    pub contents: String,
}

impl ExceptionFile {
    pub fn new(path: impl Into<String>, types: Vec<LicenseType>, contents: &str) -> Self {
        Self {
            path: path.into(),
            types,
            contents: normalize(contents),
        }
    }

    pub fn matches(&self, contents: &[u8]) -> bool {
        normalize(&String::from_utf8_lossy(contents)) == self.contents
    }
}

/// Module path to the exact license files that module is known to carry.
#[derive(Debug, Clone, Default)]
pub struct ExceptionTable {
    modules: BTreeMap<String, Vec<ExceptionFile>>,
}

impl ExceptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, module_path: impl Into<String>, files: Vec<ExceptionFile>) {
        let files = files
            .into_iter()
            .map(|f| ExceptionFile {
                contents: normalize(&f.contents),
                ..f
            })
            .collect();
        self.modules.insert(module_path.into(), files);
    }

    pub fn get(&self, module_path: &str) -> Option<&[ExceptionFile]> {
        self.modules.get(module_path).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Checks that every declared type is redistributable.
    pub fn validate(&self, policy: &Policy) -> Result<(), ConfigError> {
        for (module, files) in &self.modules {
            for file in files {
                validate_types(module, &file.path, &file.types, policy)?;
            }
        }
        Ok(())
    }
}

fn validate_types(
    owner: &str,
    path: &str,
    types: &[LicenseType],
    policy: &Policy,
) -> Result<(), ConfigError> {
    if types.is_empty() {
        return Err(ConfigError::empty_types(owner, path));
    }
    if let Some(bad) = types.iter().find(|t| !policy.is_allowed(t)) {
        return Err(ConfigError::non_redistributable(owner, path, bad.as_str()));
    }
    Ok(())
}

/// The on-disk shape of an exceptions data file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExceptionsFile {
    #[serde(default)]
    #[allow(dead_code)]
    version: Option<String>,
    #[serde(default)]
    pub corpus_additions: Vec<CorpusAddition>,
    #[serde(default)]
    pub modules: BTreeMap<String, Vec<ExceptionFile>>,
    #[serde(default)]
    pub ignore_files: BTreeMap<String, Vec<String>>,
}

impl ExceptionsFile {
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_json(BUNDLED_EXCEPTIONS, "bundled exceptions")
    }

    pub fn from_json(content: &str, source_name: &str) -> Result<Self, ConfigError> {
        let file: Self = serde_json::from_str(content)
            .map_err(|e| ConfigError::parse_error(source_name, e.to_string()))?;
        debug!(
            source = source_name,
            additions = file.corpus_additions.len(),
            modules = file.modules.len(),
            "loaded exceptions"
        );
        Ok(file)
    }

    pub fn from_yaml(content: &str, source_name: &str) -> Result<Self, ConfigError> {
        let file: Self = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::parse_error(source_name, e.to_string()))?;
        debug!(
            source = source_name,
            additions = file.corpus_additions.len(),
            modules = file.modules.len(),
            "loaded exceptions"
        );
        Ok(file)
    }

    /// Checks that every declared type in the file is redistributable.
    pub fn validate(&self, policy: &Policy) -> Result<(), ConfigError> {
        for addition in &self.corpus_additions {
            validate_types("corpus addition", &addition.id, &addition.types, policy)?;
        }
        for (module, files) in &self.modules {
            for file in files {
                validate_types(module, &file.path, &file.types, policy)?;
            }
        }
        Ok(())
    }
}
