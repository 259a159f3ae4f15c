//! Tokio codec for newline-delimited JSON
//!
//! Each frame is exactly one JSON object followed by a single `\n`. There is
//! no length prefix; JSON string escaping guarantees the payload itself never
//! contains a raw newline.
//!
//! The line limit applies to decoding only. Encoded lines are written
//! whatever their size; the renderer reads unbounded lines.

use bytes::{BufMut, BytesMut};
use serde::Serialize;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::ProtocolError;

/// Maximum length of a single decoded line, newline excluded (64 KiB)
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Codec that writes any serializable value as one JSON line and reads
/// lines back as untyped JSON values
#[derive(Debug, Clone)]
pub struct JsonLineCodec {
    max_length: usize,
    /// Bytes already scanned for a newline in the current buffer
    next_index: usize,
}

impl JsonLineCodec {
    /// Create a codec with the default line limit
    pub fn new() -> Self {
        Self::with_max_length(MAX_LINE_LENGTH)
    }

    /// Create a codec with a custom line limit
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            next_index: 0,
        }
    }

    /// Maximum line length accepted when decoding
    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

impl Default for JsonLineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for JsonLineCodec {
    type Item = serde_json::Value;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            let newline = src[self.next_index..]
                .iter()
                .position(|b| *b == b'\n')
                .map(|offset| self.next_index + offset);

            let Some(end) = newline else {
                if src.len() > self.max_length {
                    return Err(ProtocolError::LineTooLong {
                        size: src.len(),
                        max: self.max_length,
                    });
                }
                // Need more data
                self.next_index = src.len();
                return Ok(None);
            };

            self.next_index = 0;
            let line = src.split_to(end + 1);
            let mut body = &line[..end];
            if body.last() == Some(&b'\r') {
                body = &body[..body.len() - 1];
            }

            if body.len() > self.max_length {
                return Err(ProtocolError::LineTooLong {
                    size: body.len(),
                    max: self.max_length,
                });
            }

            // Blank lines carry nothing
            if body.iter().all(u8::is_ascii_whitespace) {
                tracing::trace!("Skipping blank line");
                continue;
            }

            return Ok(Some(serde_json::from_slice(body)?));
        }
    }
}

impl<T: Serialize> Encoder<T> for JsonLineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, item: T, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let payload = serde_json::to_vec(&item)?;
        dst.reserve(payload.len() + 1);
        dst.put_slice(&payload);
        dst.put_u8(b'\n');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{ClearMessage, TextMessage};
    use serde_json::json;

    #[test]
    fn test_encode_appends_single_newline() {
        let mut codec = JsonLineCodec::new();
        let mut buf = BytesMut::new();

        codec
            .encode(&TextMessage::new("m1", "hi", "red", 10, 20), &mut buf)
            .unwrap();

        assert_eq!(buf.last(), Some(&b'\n'));
        assert_eq!(buf.iter().filter(|b| **b == b'\n').count(), 1);

        let value: serde_json::Value = serde_json::from_slice(&buf[..buf.len() - 1]).unwrap();
        assert_eq!(value["id"], "m1");
        assert_eq!(value["ttl"], 4);
    }

    #[test]
    fn test_encode_escapes_embedded_newlines() {
        let mut codec = JsonLineCodec::new();
        let mut buf = BytesMut::new();

        codec
            .encode(&TextMessage::new("m", "two\nlines", "red", 0, 0), &mut buf)
            .unwrap();

        assert_eq!(buf.iter().filter(|b| **b == b'\n').count(), 1);
    }

    #[test]
    fn test_encode_has_no_length_limit() {
        let mut codec = JsonLineCodec::with_max_length(16);
        let mut buf = BytesMut::new();

        let text = "x".repeat(MAX_LINE_LENGTH * 2);
        codec
            .encode(&TextMessage::new("big", text.as_str(), "red", 0, 0), &mut buf)
            .unwrap();

        assert!(buf.len() > MAX_LINE_LENGTH * 2);
        assert_eq!(buf.last(), Some(&b'\n'));
    }

    #[test]
    fn test_decode_multiple_lines() {
        let mut codec = JsonLineCodec::new();
        let mut buf = BytesMut::new();
        codec.encode(&ClearMessage::new("a"), &mut buf).unwrap();
        codec.encode(&ClearMessage::new("b"), &mut buf).unwrap();

        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(json!({"id": "a", "ttl": 0}))
        );
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(json!({"id": "b", "ttl": 0}))
        );
        assert!(codec.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_decode_partial_read() {
        let mut codec = JsonLineCodec::new();
        let mut buf = BytesMut::from(&b"{\"id\":\"a\","[..]);

        // Should return None (need more data)
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(b"\"ttl\":0}\r\n\n");
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(json!({"id": "a", "ttl": 0}))
        );
        // Trailing blank line is skipped
        assert!(codec.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_decode_rejects_long_line() {
        let mut codec = JsonLineCodec::with_max_length(8);
        let mut buf = BytesMut::from(&b"{\"id\":\"far too long\""[..]);

        assert!(matches!(
            codec.decode(&mut buf),
            Err(ProtocolError::LineTooLong { max: 8, .. })
        ));
    }

    #[test]
    fn test_decode_invalid_json() {
        let mut codec = JsonLineCodec::new();
        let mut buf = BytesMut::from(&b"not json\n"[..]);

        assert!(matches!(
            codec.decode(&mut buf),
            Err(ProtocolError::Serialization(_))
        ));
    }
}
