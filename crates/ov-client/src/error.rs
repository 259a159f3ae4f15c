//! Client error types

use ov_core::SupervisorError;
use ov_protocol::ProtocolError;
use thiserror::Error;

/// Errors surfaced by [`crate::OverlayClient`]
#[derive(Error, Debug)]
pub enum ClientError {
    /// The renderer could not be started
    #[error("Renderer failed to start: {0}")]
    Launcher(#[from] SupervisorError),

    /// Connecting failed for a reason other than a refusal
    #[error("Failed to connect to renderer at {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The write failed again after one reconnect-and-retry
    #[error("Send to renderer failed twice, giving up: {source}")]
    DoubleFault {
        #[source]
        source: ProtocolError,
    },

    /// Payload could not be framed
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}
