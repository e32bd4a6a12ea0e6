//! Fatal processing errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// ProcessError aborts a run. Everything recoverable goes to the report instead.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("input directory does not exist: {0}")]
    InputNotFound(PathBuf),

    #[error("input path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to scan {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
