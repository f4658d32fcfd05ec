//! Canvas configuration.
//!
//! Configuration is plain JSON; every field has a default so an empty
//! object (`{}`) yields the stock 500x500 pink canvas.

use crate::brush::{BrushConfig, BrushOptions, NamedColor};
use crate::error::{CanvasError, CanvasResult};
use crate::shapes::SerializableColor;
use kurbo::Size;
use serde::{Deserialize, Serialize};

const DEFAULT_IMAGE_URL: &str = "https://images.unsplash.com/photo-1663417026017-dd3933e19074?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=60";

/// A palette entry as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorEntry {
    pub display: String,
    /// Hex color, e.g. `#e63946`.
    pub value: String,
}

/// Initial brush as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrushEntry {
    pub color: String,
    pub width: u32,
}

/// Canvas configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Fill behind the background image.
    pub background_color: String,
    /// Where the host should fetch the background image from.
    pub image_url: Option<String>,
    pub brush_colors: Vec<ColorEntry>,
    pub brush_widths: Vec<u32>,
    pub default_brush: BrushEntry,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        let options = BrushOptions::default();
        let brush = BrushConfig::default();
        Self {
            width: 500.0,
            height: 500.0,
            background_color: "#ffc0cb".to_string(),
            image_url: Some(DEFAULT_IMAGE_URL.to_string()),
            brush_colors: options
                .colors
                .iter()
                .map(|c| ColorEntry {
                    display: c.display.clone(),
                    value: c.color.to_hex(),
                })
                .collect(),
            brush_widths: options.widths,
            default_brush: BrushEntry {
                color: brush.color.to_hex(),
                width: brush.width,
            },
        }
    }
}

fn parse_color(value: &str) -> CanvasResult<SerializableColor> {
    SerializableColor::from_hex(value).ok_or_else(|| CanvasError::InvalidColor(value.to_string()))
}

impl CanvasConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CanvasError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> CanvasResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CanvasError::Config(e.to_string()))
    }

    /// Check every field that is not enforced by the type system.
    pub fn validate(&self) -> CanvasResult<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(CanvasError::Config(format!(
                "canvas size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        self.background()?;
        let options = self.brush_options()?;
        let brush = self.default_brush()?;
        options.check_width(brush.width)?;
        Ok(())
    }

    /// Canvas size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Parsed background fill.
    pub fn background(&self) -> CanvasResult<SerializableColor> {
        parse_color(&self.background_color)
    }

    /// Parsed brush palette and widths.
    pub fn brush_options(&self) -> CanvasResult<BrushOptions> {
        if self.brush_widths.is_empty() || self.brush_widths.contains(&0) {
            return Err(CanvasError::Config(
                "brush widths must be a non-empty list of positive integers".to_string(),
            ));
        }
        let colors = self
            .brush_colors
            .iter()
            .map(|entry| Ok(NamedColor::new(entry.display.clone(), parse_color(&entry.value)?)))
            .collect::<CanvasResult<Vec<_>>>()?;
        Ok(BrushOptions {
            colors,
            widths: self.brush_widths.clone(),
        })
    }

    /// Parsed initial brush.
    pub fn default_brush(&self) -> CanvasResult<BrushConfig> {
        Ok(BrushConfig {
            color: parse_color(&self.default_brush.color)?,
            width: self.default_brush.width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CanvasConfig::default();
        config.validate().unwrap();
        assert_eq!(config.size(), Size::new(500.0, 500.0));
        assert_eq!(config.background().unwrap(), SerializableColor::rgb(255, 192, 203));
        assert_eq!(config.brush_options().unwrap(), BrushOptions::default());
        assert_eq!(config.default_brush().unwrap(), BrushConfig::default());
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = CanvasConfig::from_json("{}").unwrap();
        assert_eq!(config, CanvasConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = CanvasConfig::from_json(
            r##"{ "width": 800, "brush_widths": [1, 2], "default_brush": { "color": "#000", "width": 2 } }"##,
        )
        .unwrap();
        assert!((config.width - 800.0).abs() < f64::EPSILON);
        assert!((config.height - 500.0).abs() < f64::EPSILON);
        assert_eq!(config.default_brush().unwrap().color, SerializableColor::black());
    }

    #[test]
    fn test_default_width_must_be_offered() {
        let err = CanvasConfig::from_json(r#"{ "brush_widths": [3, 5] }"#).unwrap_err();
        assert!(matches!(err, CanvasError::UnsupportedBrushWidth(10)));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            CanvasConfig::from_json(r#"{ "background_color": "pink" }"#),
            Err(CanvasError::InvalidColor(_))
        ));
        assert!(matches!(
            CanvasConfig::from_json(r#"{ "brush_widths": [] }"#),
            Err(CanvasError::Config(_))
        ));
        assert!(matches!(
            CanvasConfig::from_json(r#"{ "height": 0 }"#),
            Err(CanvasError::Config(_))
        ));
        assert!(matches!(
            CanvasConfig::from_json("not json"),
            Err(CanvasError::Config(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = CanvasConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(CanvasConfig::from_json(&json).unwrap(), config);
    }
}
