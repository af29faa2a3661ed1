//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Transport error: {0}")]
    Transport(#[from] mirror_proxy::TransportError),

    #[error("Storage error: {0}")]
    Storage(#[from] mirror_storage::StorageError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Upstream protocol violation: {0}")]
    ProtocolViolation(String),
}
