//! Checkpoint error types.

use crate::fsm::FsmError;
use thiserror::Error;

/// Errors that can occur during snapshot operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot data does not fit the machine it is restored into
    #[error("Checkpoint validation failed: {0}")]
    ValidationFailed(String),

    /// Re-entering the restored state failed
    #[error(transparent)]
    Fsm(#[from] FsmError),
}
