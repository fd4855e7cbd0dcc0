//! The static data every detector works from.
//!
//! A [`Config`] is assembled once at startup and then only read. It bundles
//! the classifier (built-in catalog plus corpus additions), the
//! redistributability policy, the module exception table and the
//! false-positive ignore list.

use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use crate::classifier::{Classifier, COVERAGE_THRESHOLD};
use crate::discovery::IgnoreList;
use crate::error::ConfigError;
use crate::exceptions::{ExceptionTable, ExceptionsFile};
use crate::policy::Policy;

/// Largest license file that will be read, in bytes.
pub const MAX_LICENSE_FILE_SIZE: u64 = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    classifier: Classifier,
    policy: Policy,
    exceptions: ExceptionTable,
    ignore: IgnoreList,
    max_file_size: u64,
}

impl Config {
    /// The production configuration: built-in catalog and bundled
    /// exceptions.
    pub fn bundled() -> Result<Self, ConfigError> {
        ConfigBuilder::new().build()
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn exceptions(&self) -> &ExceptionTable {
        &self.exceptions
    }

    pub fn ignore_list(&self) -> &IgnoreList {
        &self.ignore
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }
}

#[derive(Debug)]
pub struct ConfigBuilder {
    classifier: Option<Classifier>,
    policy: Policy,
    extra: Vec<ExceptionsFile>,
    use_exceptions: bool,
    max_file_size: u64,
    coverage_threshold: f64,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            classifier: None,
            policy: Policy::default(),
            extra: Vec::new(),
            use_exceptions: true,
            max_file_size: MAX_LICENSE_FILE_SIZE,
            coverage_threshold: COVERAGE_THRESHOLD,
        }
    }

    /// Replaces the built-in catalog, e.g. with a reduced corpus.
    pub fn classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Leaves out corpus additions and module exceptions.
    pub fn without_exceptions(mut self) -> Self {
        self.use_exceptions = false;
        self
    }

    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn coverage_threshold(mut self, percent: f64) -> Self {
        self.coverage_threshold = percent;
        self
    }

    pub fn add_exceptions(mut self, file: ExceptionsFile) -> Self {
        self.extra.push(file);
        self
    }

    /// Merges an extra exceptions file, JSON or YAML by extension.
    pub fn load_exceptions_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading exceptions file");

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::read_error(path, e.to_string()))?;
        let source_name = path.display().to_string();
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let file = match extension {
            "json" => ExceptionsFile::from_json(&content, &source_name)?,
            "yaml" | "yml" => ExceptionsFile::from_yaml(&content, &source_name)?,
            _ => return Err(ConfigError::unsupported_format(extension)),
        };
        Ok(self.add_exceptions(file))
    }

    /// Validates every exception against the policy and assembles the
    /// configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let mut files = vec![ExceptionsFile::bundled()?];
        files.extend(self.extra);
        for file in &files {
            file.validate(&self.policy)?;
        }

        let mut classifier = self
            .classifier
            .unwrap_or_else(Classifier::builtin)
            .with_threshold(self.coverage_threshold);
        let mut exceptions = ExceptionTable::new();
        let mut ignore = IgnoreList::new();

        for file in files {
            for (module, paths) in file.ignore_files {
                for path in paths {
                    ignore.insert(module.clone(), path);
                }
            }
            if !self.use_exceptions {
                continue;
            }
            for addition in file.corpus_additions {
                trace!(id = %addition.id, "adding reviewed license text to catalog");
                if !classifier.add_entry(&addition.id, &addition.text) {
                    return Err(ConfigError::unindexable_text(addition.id));
                }
                classifier.set_canonical(addition.id, addition.types);
            }
            for (module, declared) in file.modules {
                exceptions.insert(module, declared);
            }
        }

        debug!(
            catalog = classifier.entry_count(),
            exception_modules = exceptions.len(),
            ignored_files = ignore.len(),
            max_file_size = self.max_file_size,
            "license configuration ready"
        );

        Ok(Config {
            classifier,
            policy: self.policy,
            exceptions,
            ignore,
            max_file_size: self.max_file_size,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
