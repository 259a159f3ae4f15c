//! Renderer placement configuration

use serde::{Deserialize, Serialize};

use super::serde_utils::{dimension_or, LooseInt};

const DEFAULT_X: u32 = 0;
const DEFAULT_Y: u32 = 0;
const DEFAULT_WIDTH: u32 = 1920;
const DEFAULT_HEIGHT: u32 = 1080;

/// Position and size of the overlay window
///
/// Passed to the renderer as its four positional arguments and fixed for the
/// lifetime of that renderer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawRendererConfig")]
pub struct RendererConfig {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RendererConfig {
    /// Create a new placement
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Command-line arguments for the renderer, in `x y width height` order
    pub fn args(&self) -> [String; 4] {
        [
            self.x.to_string(),
            self.y.to_string(),
            self.width.to_string(),
            self.height.to_string(),
        ]
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self::new(DEFAULT_X, DEFAULT_Y, DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

/// Unvalidated `[renderer]` table as written by hand
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRendererConfig {
    x: Option<LooseInt>,
    y: Option<LooseInt>,
    width: Option<LooseInt>,
    height: Option<LooseInt>,
}

impl From<RawRendererConfig> for RendererConfig {
    fn from(raw: RawRendererConfig) -> Self {
        Self {
            x: dimension_or("x", raw.x, DEFAULT_X),
            y: dimension_or("y", raw.y, DEFAULT_Y),
            width: dimension_or("width", raw.width, DEFAULT_WIDTH),
            height: dimension_or("height", raw.height, DEFAULT_HEIGHT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        assert_eq!(RendererConfig::default().args(), ["0", "0", "1920", "1080"]);
    }

    #[test]
    fn test_invalid_values_fall_back_per_field() {
        let config: RendererConfig = toml::from_str(
            r#"
x = -40
y = "12"
width = "wide"
height = 900
"#,
        )
        .unwrap();

        assert_eq!(config, RendererConfig::new(0, 12, 1920, 900));
    }

    #[test]
    fn test_serializes_as_plain_integers() {
        let text = toml::to_string(&RendererConfig::new(5, 6, 800, 600)).unwrap();
        let back: RendererConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, RendererConfig::new(5, 6, 800, 600));
        assert!(text.contains("width = 800"));
    }
}
