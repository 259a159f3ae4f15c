//! ov-client: Best-effort socket client for the overlay renderer
//!
//! [`OverlayClient`] lazily makes sure the renderer is running, connects to
//! it on first use and writes one JSON line per draw command. Nothing is read
//! back. A failed write drops the connection and is retried once over a
//! fresh one; a refused connection is treated as "renderer still booting"
//! and swallowed.

pub mod client;
pub mod error;
pub mod policy;
pub mod transport;

pub use client::{ConnectionState, OverlayClient};
pub use error::ClientError;
pub use policy::{ErrorKind, Phase, Policy};
pub use transport::{Connector, TcpConnector, Transport};

// Re-export the message model so callers need only this crate
pub use ov_protocol::{
    ClearMessage, Marker, Message, ShapeMessage, TextMessage, TextSize, VectorMessage,
    VectorPoint, DEFAULT_TTL, SHAPE_RECT,
};
