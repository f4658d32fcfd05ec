//! Raster image shape, used for the canvas background.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use crate::error::{CanvasError, CanvasResult};
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A decoded raster image placed on the canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Display width.
    pub width: f64,
    /// Display height.
    pub height: f64,
    /// Decoded image width in pixels.
    pub source_width: u32,
    /// Decoded image height in pixels.
    pub source_height: u32,
    /// Decoded RGBA8 pixels, row-major.
    #[serde(skip)]
    pub rgba: Vec<u8>,
    /// Style properties (unused for drawing, kept for the shape interface).
    pub style: ShapeStyle,
}

impl Image {
    /// Decode PNG, JPEG or WebP bytes into an image at `position`, natural size.
    ///
    /// The format is sniffed from the data; anything else is rejected.
    pub fn decode(position: Point, data: &[u8]) -> CanvasResult<Self> {
        let decoded = ::image::load_from_memory(data)
            .map_err(|e| CanvasError::ImageLoad(e.to_string()))?
            .to_rgba8();
        let (source_width, source_height) = decoded.dimensions();

        Ok(Self {
            id: Uuid::new_v4(),
            position,
            width: source_width as f64,
            height: source_height as f64,
            source_width,
            source_height,
            rgba: decoded.into_raw(),
            style: ShapeStyle::default(),
        })
    }

    /// Get the bounding rectangle.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }
}

impl ShapeTrait for Image {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.as_rect().inflate(tolerance, tolerance).contains(point)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn transform(&mut self, affine: Affine) {
        self.position = affine * self.position;
        let scale = affine.as_coeffs();
        self.width *= scale[0].abs();
        self.height *= scale[3].abs();
    }
}
