//! State layer error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from favorites persistence.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored data could not be parsed.
    #[error("Corrupt favorites data in {path}: {message}")]
    Corrupt { path: PathBuf, message: String },

    /// The file was written by a newer format version.
    #[error("Unsupported favorites format version {0}")]
    UnsupportedVersion(u32),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}
