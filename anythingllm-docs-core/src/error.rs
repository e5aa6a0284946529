//! Error type shared by every operation in the core crate.
//!
//! Each variant corresponds to one way an operation can abort. Per-file upload
//! failures are not surfaced through this type; they are collected into
//! [`crate::upload::UploadReport`] so the batch can keep going.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the core crate.
pub type DocsResult<T> = Result<T, DocsError>;

#[derive(Debug, Error)]
pub enum DocsError {
    /// No workspace carries the requested name, or the workspace listing could not be fetched.
    #[error("workspace '{name}' not found or slug could not be determined")]
    WorkspaceNotFound { name: String },

    /// Upload path is missing or is not a directory.
    #[error("the path '{}' is not a valid directory", path.display())]
    InvalidDirectory { path: PathBuf },

    /// The service answered with a non-success status.
    #[error("request failed with status {status}: {body}")]
    RemoteRequestFailed { status: u16, body: String },

    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request never produced a usable response (connection, TLS, decoding).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl DocsError {
    /// HTTP status carried by the error, if the service produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            DocsError::RemoteRequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
