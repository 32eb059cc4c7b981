use thiserror::Error;
use vexil_core::CoreError;
use vexil_net::NetError;

/// Centralized error type for vexil-service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport failed: {0}")]
    Net(#[from] NetError),
    #[error("decode failed: {0}")]
    Decode(#[from] CoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
