//! Free-draw brush settings.

use crate::error::{CanvasError, CanvasResult};
use crate::shapes::SerializableColor;
use serde::{Deserialize, Serialize};

/// Brush applied by the surface's free-draw mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrushConfig {
    pub color: SerializableColor,
    pub width: u32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            color: SerializableColor::rgb(0xe6, 0x39, 0x46),
            width: 10,
        }
    }
}

/// A palette entry offered by the color select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedColor {
    pub display: String,
    pub color: SerializableColor,
}

impl NamedColor {
    pub fn new(display: impl Into<String>, color: SerializableColor) -> Self {
        Self {
            display: display.into(),
            color,
        }
    }
}

/// The brush choices exposed to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrushOptions {
    pub colors: Vec<NamedColor>,
    pub widths: Vec<u32>,
}

impl Default for BrushOptions {
    fn default() -> Self {
        Self {
            colors: vec![
                NamedColor::new("red", SerializableColor::rgb(0xe6, 0x39, 0x46)),
                NamedColor::new("blue", SerializableColor::rgb(0x00, 0x81, 0xa7)),
                NamedColor::new("yellow", SerializableColor::rgb(0xff, 0xbe, 0x0b)),
            ],
            widths: vec![3, 5, 7, 10, 15],
        }
    }
}

impl BrushOptions {
    /// Accept `width` only if it is one of the offered widths.
    pub fn check_width(&self, width: u32) -> CanvasResult<u32> {
        if self.widths.contains(&width) {
            Ok(width)
        } else {
            Err(CanvasError::UnsupportedBrushWidth(width))
        }
    }

    /// Look up a palette entry by its color.
    pub fn name_of(&self, color: SerializableColor) -> Option<&str> {
        self.colors
            .iter()
            .find(|c| c.color == color)
            .map(|c| c.display.as_str())
    }
}
