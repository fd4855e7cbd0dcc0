use std::path::PathBuf;
use thiserror::Error;

/// Problems with the static license data. These are startup failures: they
/// mean the data asset itself is wrong, not that a module is.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read exceptions file '{path}': {message}")]
    ReadError { path: PathBuf, message: String },

    #[error("failed to parse {source_name}: {message}")]
    ParseError {
        source_name: String,
        message: String,
    },

    #[error("unsupported exceptions format: {format} (expected json or yaml)")]
    UnsupportedFormat { format: String },

    #[error("exception for {module} ({path}) declares non-redistributable type {license_type}")]
    NonRedistributableException {
        module: String,
        path: String,
        license_type: String,
    },

    #[error("exception for {module} ({path}) declares no license types")]
    EmptyExceptionTypes { module: String, path: String },

    #[error("license text {id} is too short to match against")]
    UnindexableText { id: String },
}

impl ConfigError {
    pub fn read_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ReadError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn parse_error(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub fn non_redistributable(
        module: impl Into<String>,
        path: impl Into<String>,
        license_type: impl Into<String>,
    ) -> Self {
        Self::NonRedistributableException {
            module: module.into(),
            path: path.into(),
            license_type: license_type.into(),
        }
    }

    pub fn empty_types(module: impl Into<String>, path: impl Into<String>) -> Self {
        Self::EmptyExceptionTypes {
            module: module.into(),
            path: path.into(),
        }
    }

    pub fn unindexable_text(id: impl Into<String>) -> Self {
        Self::UnindexableText { id: id.into() }
    }
}
