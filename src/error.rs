use thiserror::Error;

use crate::container::ContainerError;

#[derive(Error, Debug)]
pub enum CodecError {
    /// Input sequence cannot be encoded (non-finite sample, too short).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Decode or analysis was handed a failed encode result.
    #[error("cannot decode a failed encode result")]
    InvalidDecodeInput,

    /// Original sequence does not have the length declared by the encoding.
    #[error("length mismatch: encoding declares {expected} samples, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Malformed persisted container.
    #[error("container error: {0}")]
    Container(#[from] ContainerError),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure for config or container payloads.
    #[error("serialization error: {0}")]
    Serialization(String),
}
