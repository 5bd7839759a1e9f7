//! Error types for the export pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the export library.
///
/// Building and serializing a snapshot never fails; everything here comes
/// from touching the filesystem, a missing platform capability, or a
/// document read back from disk that no longer honors its own contract.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Interactive download requested where no save dialog exists.
    #[error("interactive download unavailable: {0}")]
    Unavailable(String),

    /// File contents were not a valid document or state.
    #[error("failed to parse JSON from {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Document written by a different data model revision.
    #[error("unsupported export version: found {found}, expected {expected}")]
    UnsupportedVersion { found: String, expected: String },

    /// `dataCounts` disagrees with the collection it summarizes.
    #[error("dataCounts.{collection} is {recorded} but the collection holds {actual} entries")]
    CountMismatch {
        collection: &'static str,
        recorded: usize,
        actual: usize,
    },

    /// Config file could not be read or parsed.
    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}
