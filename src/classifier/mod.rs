//! License text classification.
//!
//! A [`Classifier`] turns the bytes of a license file into a set of
//! [`LicenseType`]s. Text it cannot place with enough confidence always comes
//! back as `UNKNOWN`; it never guesses a permissive answer.

pub mod catalog;
pub mod matcher;
pub mod types;

pub use matcher::{Coverage, Match, Matcher};
pub use types::{unknown_set, LicenseType, TypeSet};

use std::collections::HashMap;

use tracing::{debug, trace};

/// Minimum document coverage, in percent, for a classification to stand.
pub const COVERAGE_THRESHOLD: f64 = 75.0;

/// Longest run of unrecognized tokens a classified document may contain.
/// Anything longer could be terms of its own.
pub const MAX_UNMATCHED_RUN: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub types: TypeSet,
    pub coverage: Coverage,
}

impl Classification {
    /// The result for a file whose text could not be examined.
    pub fn unreadable() -> Self {
        Self {
            types: unknown_set(),
            coverage: Coverage::default(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.types.contains(&LicenseType::Unknown)
    }
}

#[derive(Debug, Clone)]
pub struct Classifier {
    matcher: Matcher,
    canonical: HashMap<String, Vec<LicenseType>>,
    threshold: f64,
}

impl Classifier {
    /// An empty classifier; every document classifies as `UNKNOWN` until
    /// entries are added.
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(),
            canonical: HashMap::new(),
            threshold: COVERAGE_THRESHOLD,
        }
    }

    /// A classifier over the bundled catalog.
    pub fn builtin() -> Self {
        let mut classifier = Self::with_entries(catalog::BUILTIN_TEXTS.iter().copied());
        for (id, types) in catalog::CANONICAL_TYPES {
            classifier.set_canonical(*id, types.iter().map(|t| LicenseType::from(*t)).collect());
        }
        debug!(entries = classifier.entry_count(), "built-in license catalog loaded");
        classifier
    }

    /// A classifier over just the given `(id, text)` entries.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut classifier = Self::new();
        for (id, text) in entries {
            classifier.add_entry(id, text);
        }
        classifier
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Adds a catalog text. Returns `false` if the text was too short to use.
    pub fn add_entry(&mut self, id: &str, text: &str) -> bool {
        let added = self.matcher.add(id, text);
        if !added {
            debug!(id, "license text too short to index");
        }
        added
    }

    /// Makes matches of catalog entry `id` report `types` instead of `id`.
    pub fn set_canonical(&mut self, id: impl Into<String>, types: Vec<LicenseType>) {
        self.canonical.insert(id.into(), types);
    }

    pub fn entry_count(&self) -> usize {
        self.matcher.len()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The license types catalog entry `id` resolves to.
    pub fn resolve(&self, id: &str) -> Vec<LicenseType> {
        match self.canonical.get(id) {
            Some(types) => types.clone(),
            None => vec![LicenseType::from(id)],
        }
    }

    pub fn classify(&self, contents: &[u8], path: &str) -> Classification {
        let text = String::from_utf8_lossy(contents);
        let coverage = self.matcher.scan(&text);

        if coverage.percent < self.threshold {
            trace!(path, coverage = coverage.percent, "coverage below threshold");
            return Classification {
                types: unknown_set(),
                coverage,
            };
        }
        if coverage.unmatched_run > MAX_UNMATCHED_RUN {
            trace!(path, run = coverage.unmatched_run, "unrecognized text between matches");
            return Classification {
                types: unknown_set(),
                coverage,
            };
        }

        let types: TypeSet = coverage
            .matches
            .iter()
            .flat_map(|m| self.resolve(&m.id))
            .collect();

        if types.is_empty() {
            trace!(path, "no match resolved to a license type");
            return Classification {
                types: unknown_set(),
                coverage,
            };
        }

        trace!(path, coverage = coverage.percent, ?types, "classified license file");
        Classification { types, coverage }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}
