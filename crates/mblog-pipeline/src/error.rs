//! Pipeline error types.

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors surfaced by the synchronous submission path.
///
/// The background half never returns errors to a caller: rendition
/// failures are logged and the affected object simply stays absent.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Media error: {0}")]
    Media(#[from] mblog_media::MediaError),

    #[error("Storage error: {0}")]
    Storage(#[from] mblog_storage::StorageError),
}

impl PipelineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
