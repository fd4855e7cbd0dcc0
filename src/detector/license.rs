use serde::{Serialize, Serializer};

use crate::classifier::{unknown_set, Coverage, TypeSet};

/// What was detected in one license file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LicenseMetadata {
    pub types: TypeSet,
    /// Path relative to the module content root, `/`-separated.
    pub file_path: String,
    pub coverage: Coverage,
}

impl LicenseMetadata {
    /// Metadata for a file that could not be read or examined.
    pub fn unknown(file_path: impl Into<String>) -> Self {
        Self {
            types: unknown_set(),
            file_path: file_path.into(),
            coverage: Coverage::default(),
        }
    }
}

/// A detected license file. `contents` is `None` when the file's own
/// license does not permit showing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct License {
    #[serde(flatten)]
    pub metadata: LicenseMetadata,
    #[serde(serialize_with = "contents_as_text")]
    pub contents: Option<Vec<u8>>,
}

impl License {
    pub fn file_path(&self) -> &str {
        &self.metadata.file_path
    }

    pub fn types(&self) -> &TypeSet {
        &self.metadata.types
    }
}

fn contents_as_text<S: Serializer>(
    contents: &Option<Vec<u8>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match contents {
        Some(bytes) => serializer.serialize_some(&String::from_utf8_lossy(bytes)),
        None => serializer.serialize_none(),
    }
}
