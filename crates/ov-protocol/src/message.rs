//! Draw commands understood by the overlay renderer
//!
//! Every command carries a caller-chosen `id`. The renderer keys its on-screen
//! elements by that id: sending a new command with an existing id replaces the
//! element, and the `ttl` decides when it disappears. Ids are not checked for
//! uniqueness here; replacement semantics belong to the renderer.
//!
//! # TTL
//!
//! - positive: number of seconds the element stays visible
//! - `0`: remove the element now
//! - negative: never expire

use serde::{Deserialize, Serialize};

/// TTL applied to text when the caller does not pick one
pub const DEFAULT_TTL: i64 = 4;

/// Shape name for filled/outlined rectangles
pub const SHAPE_RECT: &str = "rect";

/// Shape name for vector (marker path) drawings
pub const SHAPE_VECT: &str = "vect";

/// Font size for text elements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    /// Body font
    #[default]
    Normal,
    /// Title font
    Large,
}

impl std::str::FromStr for TextSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(TextSize::Normal),
            "large" => Ok(TextSize::Large),
            other => Err(format!("unknown text size: {}", other)),
        }
    }
}

/// A line of text drawn at a fixed position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMessage {
    pub id: String,
    pub color: String,
    pub text: String,
    #[serde(default)]
    pub size: TextSize,
    pub x: u32,
    pub y: u32,
    #[serde(default = "default_ttl")]
    pub ttl: i64,
}

fn default_ttl() -> i64 {
    DEFAULT_TTL
}

impl TextMessage {
    /// Create a text message with the default size and TTL
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        color: impl Into<String>,
        x: u32,
        y: u32,
    ) -> Self {
        Self {
            id: id.into(),
            color: color.into(),
            text: text.into(),
            size: TextSize::Normal,
            x,
            y,
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: i64) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_size(mut self, size: TextSize) -> Self {
        self.size = size;
        self
    }
}

/// A rectangle with separate outline and fill colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeMessage {
    pub id: String,
    pub shape: String,
    pub color: String,
    pub fill: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub ttl: i64,
}

impl ShapeMessage {
    /// Create a shape message
    ///
    /// `shape` is passed through untouched; the renderer currently only
    /// draws [`SHAPE_RECT`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        shape: impl Into<String>,
        color: impl Into<String>,
        fill: impl Into<String>,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        ttl: i64,
    ) -> Self {
        Self {
            id: id.into(),
            shape: shape.into(),
            color: color.into(),
            fill: fill.into(),
            x,
            y,
            w,
            h,
            ttl,
        }
    }
}

/// Marker drawn at each point of a vector drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    Circle,
    Cross,
}

/// One labelled point of a vector drawing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorPoint {
    pub x: u32,
    pub y: u32,
    pub marker: Marker,
    pub color: String,
    pub text: String,
}

/// A polyline through labelled points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorMessage {
    pub id: String,
    pub shape: String,
    pub color: String,
    pub ttl: i64,
    pub vector: Vec<VectorPoint>,
}

impl VectorMessage {
    pub fn new(
        id: impl Into<String>,
        color: impl Into<String>,
        vector: Vec<VectorPoint>,
        ttl: i64,
    ) -> Self {
        Self {
            id: id.into(),
            shape: SHAPE_VECT.to_string(),
            color: color.into(),
            ttl,
            vector,
        }
    }
}

/// Removes the element with the given id
///
/// The renderer treats a command without a drawable and with a TTL of zero
/// as an immediate expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearMessage {
    pub id: String,
    pub ttl: i64,
}

impl ClearMessage {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ttl: 0,
        }
    }
}

/// Any command the renderer accepts
///
/// Serialized without a tag: the field set alone identifies the variant,
/// which is what the renderer expects on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Text(TextMessage),
    Vector(VectorMessage),
    Shape(ShapeMessage),
    Clear(ClearMessage),
}

impl Message {
    /// The element id this command targets
    pub fn id(&self) -> &str {
        match self {
            Message::Text(m) => &m.id,
            Message::Vector(m) => &m.id,
            Message::Shape(m) => &m.id,
            Message::Clear(m) => &m.id,
        }
    }
}

impl From<TextMessage> for Message {
    fn from(m: TextMessage) -> Self {
        Message::Text(m)
    }
}

impl From<ShapeMessage> for Message {
    fn from(m: ShapeMessage) -> Self {
        Message::Shape(m)
    }
}

impl From<VectorMessage> for Message {
    fn from(m: VectorMessage) -> Self {
        Message::Vector(m)
    }
}

impl From<ClearMessage> for Message {
    fn from(m: ClearMessage) -> Self {
        Message::Clear(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_message_fields() {
        let msg = TextMessage::new("m1", "hi", "red", 10, 20);
        let value = serde_json::to_value(&msg).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "m1",
                "color": "red",
                "text": "hi",
                "size": "normal",
                "x": 10,
                "y": 20,
                "ttl": 4,
            })
        );
    }

    #[test]
    fn test_text_message_large_forever() {
        let msg = TextMessage::new("title", "Welcome", "#ffcc00", 0, 0)
            .with_size(TextSize::Large)
            .with_ttl(-1);
        let value = serde_json::to_value(&msg).unwrap();

        assert_eq!(value["size"], "large");
        assert_eq!(value["ttl"], -1);
    }

    #[test]
    fn test_shape_message_fields() {
        let msg = ShapeMessage::new("box", SHAPE_RECT, "green", "#000000", 1, 2, 30, 40, 8);
        let value = serde_json::to_value(&msg).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "box",
                "shape": "rect",
                "color": "green",
                "fill": "#000000",
                "x": 1,
                "y": 2,
                "w": 30,
                "h": 40,
                "ttl": 8,
            })
        );
    }

    #[test]
    fn test_vector_message_fields() {
        let msg = VectorMessage::new(
            "route",
            "yellow",
            vec![VectorPoint {
                x: 5,
                y: 6,
                marker: Marker::Cross,
                color: "blue".to_string(),
                text: "A".to_string(),
            }],
            10,
        );
        let value = serde_json::to_value(&msg).unwrap();

        assert_eq!(value["shape"], "vect");
        assert_eq!(value["vector"][0]["marker"], "cross");
        assert_eq!(value["vector"][0]["text"], "A");
    }

    #[test]
    fn test_clear_message_has_zero_ttl() {
        let value = serde_json::to_value(ClearMessage::new("m1")).unwrap();
        assert_eq!(value, json!({"id": "m1", "ttl": 0}));
    }

    #[test]
    fn test_untagged_message_picks_variant_by_fields() {
        let text: Message =
            serde_json::from_value(json!({"id": "a", "color": "red", "text": "x", "x": 0, "y": 0}))
                .unwrap();
        assert!(matches!(&text, Message::Text(t) if t.ttl == DEFAULT_TTL && t.size == TextSize::Normal));

        let shape: Message = serde_json::from_value(json!({
            "id": "b", "shape": "rect", "color": "red", "fill": "red",
            "x": 0, "y": 0, "w": 1, "h": 1, "ttl": 2
        }))
        .unwrap();
        assert!(matches!(shape, Message::Shape(_)));

        let clear: Message = serde_json::from_value(json!({"id": "c", "ttl": 0})).unwrap();
        assert!(matches!(clear, Message::Clear(_)));
        assert_eq!(clear.id(), "c");
    }

    #[test]
    fn test_text_size_from_str() {
        assert_eq!("large".parse::<TextSize>().unwrap(), TextSize::Large);
        assert!("huge".parse::<TextSize>().is_err());
    }
}
