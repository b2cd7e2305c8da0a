//! Write error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for record delivery
pub type WriteResult<T> = Result<T, WriteError>;

/// Errors surfaced when delivering a record to the active target.
///
/// Filtering, suspension and a missing target are never errors; only a
/// write that was actually attempted can fail.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The target file could not be opened for append.
    #[error("failed to open log file '{path}': {source}")]
    OpenFailed {
        /// Path of the target file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The UI container addressed by the target no longer resolves.
    #[error("log container no longer exists: {container}")]
    TargetMissing {
        /// Canonical reference of the missing container.
        container: String,
    },

    /// The target was opened but writing the record failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl WriteError {
    /// Returns `true` for [`WriteError::OpenFailed`].
    #[must_use]
    pub fn is_open_failed(&self) -> bool {
        matches!(self, Self::OpenFailed { .. })
    }
}
