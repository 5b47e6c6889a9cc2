//! Error types for the savesnap crate.

use std::path::PathBuf;

/// Savesnap-specific error types.
#[derive(Debug, thiserror::Error)]
pub enum SnapError {
    /// A source that must exist for the operation is absent.
    #[error("required source not found: {path}")]
    MissingSource { path: PathBuf },

    /// Copying bytes to the destination (or its staging path) failed.
    #[error("failed to copy {from} to {to}: {source}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The existing destination could not be removed; it still holds its
    /// original content.
    #[error("failed to delete {path}: {source}")]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The staged copy could not be moved into place. The new content is
    /// left at `staging`.
    #[error("failed to move {staging} into place at {destination}: {source}")]
    RenameFailed {
        staging: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A backup slot directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The action source could not be registered or read.
    #[error("action source error: {0}")]
    EventSource(String),

    /// The platform user-data directory could not be determined.
    #[error("could not determine the user data directory")]
    DataRootUnavailable,
}

impl SnapError {
    /// Whether this error must stop the process rather than be reported and
    /// skipped by the dispatch loop.
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DirectoryCreateFailed { .. } | Self::EventSource(_) | Self::DataRootUnavailable
        )
    }
}

/// Convenience result type for savesnap operations.
pub type SnapResult<T> = Result<T, SnapError>;
