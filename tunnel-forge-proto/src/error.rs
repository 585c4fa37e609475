//! Data model error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("Invalid endpoint: {0} (expected host:port)")]
    InvalidEndpoint(String),

    #[error("Invalid port in endpoint: {0}")]
    InvalidPort(String),
}
