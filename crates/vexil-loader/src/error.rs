use thiserror::Error;
use vexil_core::CoreError;

/// Centralized error type for vexil-loader
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The location text could not be turned into an image key. Surfaced
    /// synchronously; nothing was registered.
    #[error("invalid image location: {0}")]
    InvalidLocation(#[from] CoreError),
    /// The driver task has shut down.
    #[error("image loader is stopped")]
    Stopped,
}

pub type LoaderResult<T> = Result<T, LoaderError>;
