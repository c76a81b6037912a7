//! Error types for seadiff

use serde::Serialize;
use thiserror::Error;

/// Errors produced by the diff resolution and retrieval pipeline
#[derive(Error, Debug)]
pub enum SeadiffError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// The selection count is incompatible with the requested comparison
    /// mode. Non-fatal: callers surface the message and abort the view.
    #[error("Selection mismatch: mode requires {expected} selected revision(s), got {actual}")]
    SelectionMismatch { expected: usize, actual: usize },

    /// A caller violated a precondition: no baseline, no tree object, and no
    /// concrete target revision either. Fatal — signals a caller bug.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),

    /// A deferred patch producer failed on a worker context. Carries the
    /// original error chain so the failure diagnoses as if synchronous.
    #[error("Deferred diff load failed for '{path}'")]
    DeferredLoad {
        path: String,
        #[source]
        source: Box<SeadiffError>,
    },
}

impl SeadiffError {
    /// Stable machine-readable code for IPC surfaces
    pub fn code(&self) -> &'static str {
        match self {
            SeadiffError::Git(_) => "GIT_ERROR",
            SeadiffError::Io(_) => "IO_ERROR",
            SeadiffError::Join(_) => "JOIN_ERROR",
            SeadiffError::SelectionMismatch { .. } => "SELECTION_MISMATCH",
            SeadiffError::InvalidState(_) => "INVALID_STATE",
            SeadiffError::InvalidPath(_) => "INVALID_PATH",
            SeadiffError::OperationFailed(_) => "OPERATION_FAILED",
            SeadiffError::DeferredLoad { .. } => "DEFERRED_LOAD",
        }
    }
}

/// Serializable error response for IPC
#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl From<&SeadiffError> for ErrorResponse {
    fn from(error: &SeadiffError) -> Self {
        let details = match error {
            SeadiffError::DeferredLoad { source, .. } => Some(source.to_string()),
            _ => None,
        };
        ErrorResponse {
            code: error.code().to_string(),
            message: error.to_string(),
            details,
        }
    }
}

impl Serialize for SeadiffError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ErrorResponse::from(self).serialize(serializer)
    }
}

/// Result type alias for seadiff operations
pub type Result<T> = std::result::Result<T, SeadiffError>;
