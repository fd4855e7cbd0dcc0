use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("file '{path}' is too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("failed to scan directory at {path}: {source}")]
    DirectoryScanError {
        path: PathBuf,
        source: walkdir::Error,
    },
}

impl IoError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    pub fn file_too_large(path: impl Into<PathBuf>, size: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            size,
            max,
        }
    }
}
