#![forbid(unsafe_code)]

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid image location: {0}")]
    InvalidLocation(String),
    #[error("image location is missing required component: {0}")]
    MissingComponent(String),
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

pub type CoreResult<T> = Result<T, CoreError>;
