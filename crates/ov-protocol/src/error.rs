//! Protocol error types

use thiserror::Error;

/// Errors that can occur while framing or parsing renderer messages
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Payload could not be encoded to (or decoded from) JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A single line exceeded the codec's maximum length
    #[error("Line too long: {size} bytes exceeds maximum of {max} bytes")]
    LineTooLong { size: usize, max: usize },

    /// I/O error from the underlying transport
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
