/// Errors raised at the engine boundary.
///
/// Nothing above the `Controller` ever sees these as `Err`: they are turned
/// into notifications, failure counts or a `Failed` scan session.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Path does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not move {path} to trash: {message}")]
    Trash { path: PathBuf, message: String },

    #[error("Scan rejected: {0}")]
    ScanRejected(String),

    #[error("No drives found")]
    NoVolumes,
}

impl EngineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Classify an I/O failure on `path`, promoting `NotFound` to its own variant.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::io(path, source)
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
