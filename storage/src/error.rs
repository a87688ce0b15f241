use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing the storage file
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access storage file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize storage entries: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to create storage directory {path:?}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    pub fn directory(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Directory {
            path: path.into(),
            source,
        }
    }
}
