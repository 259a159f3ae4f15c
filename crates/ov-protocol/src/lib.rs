//! ov-protocol: Wire format for the overlay renderer socket
//!
//! The renderer listens on a local TCP port and accepts draw commands as
//! newline-delimited JSON objects. This crate defines those commands and the
//! line codec used to frame them. The channel is write-only from the client's
//! side: nothing is ever read back from the renderer.

pub mod codec;
pub mod error;
pub mod message;

pub use codec::{JsonLineCodec, MAX_LINE_LENGTH};
pub use error::ProtocolError;
pub use message::{
    ClearMessage, Marker, Message, ShapeMessage, TextMessage, TextSize, VectorMessage,
    VectorPoint, DEFAULT_TTL, SHAPE_RECT, SHAPE_VECT,
};
